//! Data-access layer (psycopg2). Each operation opens its own connection and cursor, closed on every exit path.
//! Row mapping, SELECT and INSERT all come from one `EntityQueries` per entity.

use super::{py_str, Operation, Route};
use crate::config::{ResolvedEntity, ResolvedModel};
use crate::settings::DatabaseSettings;
use crate::sql::EntityQueries;
use std::fmt;

pub struct DataAccessModule<'a> {
    pub model: &'a ResolvedModel,
    pub settings: &'a DatabaseSettings,
}

impl fmt::Display for DataAccessModule<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let db = self.settings;
        writeln!(f, "from contextlib import closing")?;
        writeln!(f)?;
        writeln!(f, "import psycopg2")?;
        writeln!(f)?;
        writeln!(f)?;
        writeln!(f, "def _connect():")?;
        writeln!(f, "    return psycopg2.connect(")?;
        writeln!(f, "        dbname={},", py_str(&db.name))?;
        writeln!(f, "        user={},", py_str(&db.user))?;
        writeln!(f, "        host={},", py_str(&db.host))?;
        writeln!(f, "        port={},", db.port)?;
        writeln!(f, "        password={},", py_str(&db.password))?;
        writeln!(f, "    )")?;
        for entity in &self.model.entities {
            write_entity(f, entity)?;
        }
        Ok(())
    }
}

fn row_mapper(entity: &ResolvedEntity) -> String {
    format!("_{}_from_row", entity.name)
}

fn write_entity(f: &mut fmt::Formatter<'_>, entity: &ResolvedEntity) -> fmt::Result {
    let queries = EntityQueries::for_entity(entity);
    let mapper = row_mapper(entity);
    tracing::debug!(entity = %entity.name, select = %queries.select_list(), insert = %queries.insert(), "data access");

    let fields = queries
        .select_columns()
        .iter()
        .enumerate()
        .map(|(i, col)| format!("{}: row[{}]", py_str(col), i))
        .collect::<Vec<_>>()
        .join(", ");
    writeln!(f)?;
    writeln!(f)?;
    writeln!(f, "def {}(row):", mapper)?;
    writeln!(f, "    return {{{}}}", fields)?;

    for op in Operation::ALL {
        let route = Route::new(entity, op);
        writeln!(f)?;
        writeln!(f)?;
        writeln!(f, "def {}({}):", route.function, route.params())?;
        match op {
            Operation::List => {
                write_scoped_cursor(f)?;
                writeln!(f, "            cursor.execute({})", py_str(&queries.select_list()))?;
                writeln!(f, "            return [{}(row) for row in cursor.fetchall()]", mapper)?;
            }
            Operation::Create => {
                writeln!(f, "    values = {}", bind_tuple(&queries.columns))?;
                write_scoped_cursor(f)?;
                writeln!(f, "            cursor.execute({}, values)", py_str(&queries.insert()))?;
                writeln!(f, "            return {}(cursor.fetchone() + values)", mapper)?;
            }
            Operation::Read => {
                write_scoped_cursor(f)?;
                writeln!(
                    f,
                    "            cursor.execute({}, ({},))",
                    py_str(&queries.select_by_id()),
                    route.params()
                )?;
                writeln!(f, "            row = cursor.fetchone()")?;
                writeln!(f, "            return None if row is None else {}(row)", mapper)?;
            }
        }
    }
    Ok(())
}

fn write_scoped_cursor(f: &mut fmt::Formatter<'_>) -> fmt::Result {
    writeln!(f, "    with closing(_connect()) as connection:")?;
    writeln!(f, "        with connection, connection.cursor() as cursor:")
}

/// Body values in column order. A missing key raises before any connection is opened.
fn bind_tuple(columns: &[String]) -> String {
    let items: Vec<String> = columns.iter().map(|c| format!("body[{}]", py_str(c))).collect();
    match items.len() {
        0 => "()".to_string(),
        1 => format!("({},)", items[0]),
        _ => format!("({})", items.join(", ")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{parse_spec, resolve};
    use pretty_assertions::assert_eq;

    fn render(json: &str) -> String {
        let model = resolve(&parse_spec(json).unwrap()).unwrap();
        DataAccessModule {
            model: &model,
            settings: &DatabaseSettings::default(),
        }
        .to_string()
    }

    #[test]
    fn renders_scoped_operations() {
        let out = render(
            r#"{
                "book": { "properties": {
                    "title": { "type": "string" },
                    "author": { "type": "$person" },
                    "chapters": { "type": "number", "list": true }
                } },
                "person": { "properties": { "name": { "type": "string" } } }
            }"#,
        );
        assert_eq!(
            out,
            r#"from contextlib import closing

import psycopg2


def _connect():
    return psycopg2.connect(
        dbname='postgres',
        user='postgres',
        host='psql',
        port=5432,
        password='password',
    )


def _book_from_row(row):
    return {'id': row[0], 'title': row[1], 'author': row[2]}


def get_books():
    with closing(_connect()) as connection:
        with connection, connection.cursor() as cursor:
            cursor.execute('SELECT id, title, author FROM book')
            return [_book_from_row(row) for row in cursor.fetchall()]


def post_books(body):
    values = (body['title'], body['author'])
    with closing(_connect()) as connection:
        with connection, connection.cursor() as cursor:
            cursor.execute('INSERT INTO book (title, author) VALUES (%s, %s) RETURNING id', values)
            return _book_from_row(cursor.fetchone() + values)


def get_book(book_id):
    with closing(_connect()) as connection:
        with connection, connection.cursor() as cursor:
            cursor.execute('SELECT id, title, author FROM book WHERE id = %s', (book_id,))
            row = cursor.fetchone()
            return None if row is None else _book_from_row(row)


def _person_from_row(row):
    return {'id': row[0], 'name': row[1]}


def get_persons():
    with closing(_connect()) as connection:
        with connection, connection.cursor() as cursor:
            cursor.execute('SELECT id, name FROM person')
            return [_person_from_row(row) for row in cursor.fetchall()]


def post_persons(body):
    values = (body['name'],)
    with closing(_connect()) as connection:
        with connection, connection.cursor() as cursor:
            cursor.execute('INSERT INTO person (name) VALUES (%s) RETURNING id', values)
            return _person_from_row(cursor.fetchone() + values)


def get_person(person_id):
    with closing(_connect()) as connection:
        with connection, connection.cursor() as cursor:
            cursor.execute('SELECT id, name FROM person WHERE id = %s', (person_id,))
            row = cursor.fetchone()
            return None if row is None else _person_from_row(row)
"#
        );
    }

    #[test]
    fn connection_settings_stay_single_line_literals() {
        let model = resolve(&parse_spec(r#"{ "book": {} }"#).unwrap()).unwrap();
        let settings = DatabaseSettings {
            password: "se'cret\nline".into(),
            ..DatabaseSettings::default()
        };
        let out = DataAccessModule {
            model: &model,
            settings: &settings,
        }
        .to_string();
        assert!(out.contains("        password='se\\'cret\\nline',\n"), "{}", out);
    }

    #[test]
    fn list_properties_are_never_bound() {
        let out = render(r#"{ "tag": { "properties": { "labels": { "type": "string", "list": true } } } }"#);
        assert!(out.contains("    values = ()\n"));
        assert!(out.contains("'INSERT INTO tag DEFAULT VALUES RETURNING id'"));
        assert!(!out.contains("labels"));
    }
}
