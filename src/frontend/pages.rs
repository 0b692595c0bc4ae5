use super::{js_str, js_template_text, DisplayField, EntityPage, InputKind};
use std::fmt;

/// Home page listing every collection.
pub struct IndexPage<'a> {
    pub pages: &'a [EntityPage],
}

/// List of items plus the create form.
pub struct CollectionPage<'a> {
    pub page: &'a EntityPage,
    pub api_base: &'a str,
}

/// Single item fetched by the `[id]` route segment.
pub struct DetailPage<'a> {
    pub page: &'a EntityPage,
    pub api_base: &'a str,
}

impl fmt::Display for IndexPage<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "import Link from \"next/link\";")?;
        writeln!(f)?;
        writeln!(f, "export default function Home() {{")?;
        writeln!(f, "  return (")?;
        writeln!(f, "    <main className=\"m-8\">")?;
        writeln!(f, "      <ul className=\"text-blue-400 text-4xl\">")?;
        for page in self.pages {
            writeln!(
                f,
                "        <li key={} className=\"m-8\">",
                js_str(&page.plural)
            )?;
            writeln!(
                f,
                "          <Link href={}>{}</Link>",
                js_str(&format!("/{}", page.plural)),
                crate::case::title_case(&page.plural)
            )?;
            writeln!(f, "        </li>")?;
        }
        writeln!(f, "      </ul>")?;
        writeln!(f, "    </main>")?;
        writeln!(f, "  );")?;
        writeln!(f, "}}")
    }
}

fn write_type(f: &mut fmt::Formatter<'_>, page: &EntityPage) -> fmt::Result {
    writeln!(f, "type {} = {{", page.title)?;
    writeln!(f, "  id: number;")?;
    for field in &page.type_fields {
        if field.list {
            writeln!(f, "  {}?: {}[];", field.name, field.ty)?;
        } else {
            writeln!(f, "  {}: {};", field.name, field.ty)?;
        }
    }
    writeln!(f, "}};")
}

/// Label/value rows for one item; `indent` is the JSX nesting depth in spaces.
fn write_display_fields(f: &mut fmt::Formatter<'_>, page: &EntityPage, indent: usize) -> fmt::Result {
    let pad = " ".repeat(indent);
    for field in &page.display_fields {
        match field {
            DisplayField::Text { name, label } => {
                writeln!(f, "{}<p>{}: {{item.{}}}</p>", pad, label, name)?;
            }
            DisplayField::Link {
                name,
                label,
                target_plural,
            } => {
                writeln!(f, "{}<p>", pad)?;
                writeln!(
                    f,
                    "{}  {}: <Link href={{`/{}/${{item.{}}}`}} className=\"text-blue-400\">{{item.{}}}</Link>",
                    pad,
                    label,
                    js_template_text(target_plural),
                    name,
                    name
                )?;
                writeln!(f, "{}</p>", pad)?;
            }
        }
    }
    Ok(())
}

impl fmt::Display for CollectionPage<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let page = self.page;
        let title = &page.title;
        let endpoint = format!("{}/{}", js_template_text(self.api_base), page.plural);

        writeln!(f, "import Link from \"next/link\";")?;
        writeln!(f, "import {{ revalidatePath }} from \"next/cache\";")?;
        writeln!(f)?;
        write_type(f, page)?;

        writeln!(f)?;
        writeln!(f, "async function create{}(formData: FormData) {{", title)?;
        writeln!(f, "  \"use server\";")?;
        writeln!(f, "  await fetch(`{}`, {{", endpoint)?;
        writeln!(f, "    method: \"POST\",")?;
        writeln!(f, "    headers: {{ \"Content-Type\": \"application/json\" }},")?;
        writeln!(f, "    body: JSON.stringify({{")?;
        for field in &page.form_fields {
            let value = format!("formData.get({})", js_str(&field.name));
            match field.input {
                InputKind::Text => writeln!(f, "      {}: {},", field.name, value)?,
                InputKind::Number => writeln!(f, "      {}: Number({}),", field.name, value)?,
            }
        }
        writeln!(f, "    }}),")?;
        writeln!(f, "  }});")?;
        writeln!(f, "  revalidatePath({});", js_str(&format!("/{}", page.plural)))?;
        writeln!(f, "}}")?;

        writeln!(f)?;
        writeln!(f, "function Create{}Form() {{", title)?;
        writeln!(f, "  return (")?;
        writeln!(f, "    <form action={{create{}}} className=\"w-fit m-8\">", title)?;
        for field in &page.form_fields {
            let input_type = match field.input {
                InputKind::Text => "text",
                InputKind::Number => "number",
            };
            writeln!(f, "      <label className=\"flex justify-between space-x-4\">")?;
            writeln!(f, "        <span>{}:</span>", field.label)?;
            writeln!(
                f,
                "        <input name={} type=\"{}\" className=\"border border-black\" />",
                js_str(&field.name),
                input_type
            )?;
            writeln!(f, "      </label>")?;
        }
        writeln!(
            f,
            "      <button type=\"submit\" className=\"bg-blue-500 rounded\">Create New {}</button>",
            title
        )?;
        writeln!(f, "    </form>")?;
        writeln!(f, "  );")?;
        writeln!(f, "}}")?;

        writeln!(f)?;
        writeln!(f, "function {}Item({{ item }}: {{ item: {} }}) {{", title, title)?;
        writeln!(f, "  return (")?;
        writeln!(f, "    <li className=\"m-8 text-xl border border-black rounded\">")?;
        write_display_fields(f, page, 6)?;
        writeln!(
            f,
            "      <Link href={{`/{}/${{item.id}}`}} className=\"text-blue-400\">Details</Link>",
            js_template_text(&page.plural)
        )?;
        writeln!(f, "    </li>")?;
        writeln!(f, "  );")?;
        writeln!(f, "}}")?;

        writeln!(f)?;
        writeln!(f, "export default async function {}sPage() {{", title)?;
        writeln!(f, "  const response = await fetch(`{}`, {{ cache: \"no-store\" }});", endpoint)?;
        writeln!(f, "  const items: {}[] = await response.json();", title)?;
        writeln!(f, "  return (")?;
        writeln!(f, "    <main>")?;
        writeln!(f, "      <h1 className=\"m-8 text-4xl\">{}s</h1>", title)?;
        writeln!(f, "      <Create{}Form />", title)?;
        writeln!(f, "      <ul>")?;
        writeln!(f, "        {{items.map((item) => (")?;
        writeln!(f, "          <{}Item key={{item.id}} item={{item}} />", title)?;
        writeln!(f, "        ))}}")?;
        writeln!(f, "      </ul>")?;
        writeln!(f, "    </main>")?;
        writeln!(f, "  );")?;
        writeln!(f, "}}")
    }
}

impl fmt::Display for DetailPage<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let page = self.page;
        let title = &page.title;

        if page.has_links() {
            writeln!(f, "import Link from \"next/link\";")?;
        }
        writeln!(f, "import {{ notFound }} from \"next/navigation\";")?;
        writeln!(f)?;
        write_type(f, page)?;
        writeln!(f)?;
        writeln!(
            f,
            "export default async function {}DetailPage({{ params }}: {{ params: {{ id: string }} }}) {{",
            title
        )?;
        writeln!(
            f,
            "  const response = await fetch(`{}/{}/${{params.id}}`, {{ cache: \"no-store\" }});",
            js_template_text(self.api_base),
            page.plural
        )?;
        writeln!(f, "  if (response.status === 404) {{")?;
        writeln!(f, "    notFound();")?;
        writeln!(f, "  }}")?;
        writeln!(f, "  const item: {} = await response.json();", title)?;
        writeln!(f, "  return (")?;
        writeln!(f, "    <main className=\"m-8 text-xl\">")?;
        writeln!(f, "      <h1 className=\"text-4xl\">{} {{item.id}}</h1>", title)?;
        write_display_fields(f, page, 6)?;
        writeln!(f, "    </main>")?;
        writeln!(f, "  );")?;
        writeln!(f, "}}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{parse_spec, resolve};
    use pretty_assertions::assert_eq;

    const BOOK_SPEC: &str = r#"{
        "book": { "properties": {
            "title": { "type": "string" },
            "author": { "type": "$person" },
            "chapters": { "type": "$chapter", "list": true }
        } },
        "person": { "properties": { "name": { "type": "string" } } },
        "chapter": {}
    }"#;

    fn pages() -> Vec<EntityPage> {
        let model = resolve(&parse_spec(BOOK_SPEC).unwrap()).unwrap();
        model.entities.iter().map(EntityPage::for_entity).collect()
    }

    #[test]
    fn collection_page() {
        let pages = pages();
        let out = CollectionPage {
            page: &pages[0],
            api_base: "http://localhost:8000",
        }
        .to_string();
        assert_eq!(
            out,
            r#"import Link from "next/link";
import { revalidatePath } from "next/cache";

type Book = {
  id: number;
  title: string;
  author: number;
  chapters?: number[];
};

async function createBook(formData: FormData) {
  "use server";
  await fetch(`http://localhost:8000/books`, {
    method: "POST",
    headers: { "Content-Type": "application/json" },
    body: JSON.stringify({
      title: formData.get("title"),
      author: Number(formData.get("author")),
    }),
  });
  revalidatePath("/books");
}

function CreateBookForm() {
  return (
    <form action={createBook} className="w-fit m-8">
      <label className="flex justify-between space-x-4">
        <span>Title:</span>
        <input name="title" type="text" className="border border-black" />
      </label>
      <label className="flex justify-between space-x-4">
        <span>Author:</span>
        <input name="author" type="number" className="border border-black" />
      </label>
      <button type="submit" className="bg-blue-500 rounded">Create New Book</button>
    </form>
  );
}

function BookItem({ item }: { item: Book }) {
  return (
    <li className="m-8 text-xl border border-black rounded">
      <p>Title: {item.title}</p>
      <p>
        Author: <Link href={`/persons/${item.author}`} className="text-blue-400">{item.author}</Link>
      </p>
      <Link href={`/books/${item.id}`} className="text-blue-400">Details</Link>
    </li>
  );
}

export default async function BooksPage() {
  const response = await fetch(`http://localhost:8000/books`, { cache: "no-store" });
  const items: Book[] = await response.json();
  return (
    <main>
      <h1 className="m-8 text-4xl">Books</h1>
      <CreateBookForm />
      <ul>
        {items.map((item) => (
          <BookItem key={item.id} item={item} />
        ))}
      </ul>
    </main>
  );
}
"#
        );
    }

    #[test]
    fn detail_page() {
        let pages = pages();
        let out = DetailPage {
            page: &pages[0],
            api_base: "http://localhost:8000",
        }
        .to_string();
        assert_eq!(
            out,
            r#"import Link from "next/link";
import { notFound } from "next/navigation";

type Book = {
  id: number;
  title: string;
  author: number;
  chapters?: number[];
};

export default async function BookDetailPage({ params }: { params: { id: string } }) {
  const response = await fetch(`http://localhost:8000/books/${params.id}`, { cache: "no-store" });
  if (response.status === 404) {
    notFound();
  }
  const item: Book = await response.json();
  return (
    <main className="m-8 text-xl">
      <h1 className="text-4xl">Book {item.id}</h1>
      <p>Title: {item.title}</p>
      <p>
        Author: <Link href={`/persons/${item.author}`} className="text-blue-400">{item.author}</Link>
      </p>
    </main>
  );
}
"#
        );
    }

    #[test]
    fn detail_page_without_references_skips_link_import() {
        let pages = pages();
        let out = DetailPage {
            page: &pages[1],
            api_base: "http://localhost:8000",
        }
        .to_string();
        assert!(out.starts_with("import { notFound } from \"next/navigation\";\n"));
        assert!(out.contains("      <p>Name: {item.name}</p>\n"));
    }

    #[test]
    fn list_properties_stay_out_of_forms_and_payloads() {
        let pages = pages();
        let out = CollectionPage {
            page: &pages[0],
            api_base: "http://localhost:8000",
        }
        .to_string();
        assert!(out.contains("  chapters?: number[];\n"));
        assert!(!out.contains("formData.get(\"chapters\")"));
        assert!(!out.contains("name=\"chapters\""));
        assert!(!out.contains("item.chapters"));
    }

    #[test]
    fn index_page_lists_collections_in_order() {
        let pages = pages();
        assert_eq!(
            IndexPage { pages: &pages }.to_string(),
            r#"import Link from "next/link";

export default function Home() {
  return (
    <main className="m-8">
      <ul className="text-blue-400 text-4xl">
        <li key="books" className="m-8">
          <Link href="/books">Books</Link>
        </li>
        <li key="persons" className="m-8">
          <Link href="/persons">Persons</Link>
        </li>
        <li key="chapters" className="m-8">
          <Link href="/chapters">Chapters</Link>
        </li>
      </ul>
    </main>
  );
}
"#
        );
    }
}
