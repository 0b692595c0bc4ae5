//! Routing layer (FastAPI app): handlers only parse input and delegate to the service layer.
//! Handlers are plain `def` because the data-access layer blocks; FastAPI runs them in its threadpool.

use super::{py_str, Operation, Route};
use crate::settings::GeneratorSettings;
use std::fmt;

pub struct RoutingModule<'a> {
    pub routes: &'a [Route],
    pub settings: &'a GeneratorSettings,
}

impl fmt::Display for RoutingModule<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "from fastapi import Body, FastAPI, HTTPException")?;
        writeln!(f, "from app import service")?;
        writeln!(f, "import uvicorn")?;
        writeln!(f)?;
        writeln!(f, "app = FastAPI()")?;
        for route in self.routes {
            writeln!(f)?;
            writeln!(f)?;
            write_handler(f, route)?;
        }
        writeln!(f)?;
        writeln!(f)?;
        writeln!(f, "if __name__ == '__main__':")?;
        writeln!(
            f,
            "    uvicorn.run(app, host={}, port={})",
            py_str(&self.settings.server_host),
            self.settings.server_port
        )
    }
}

fn write_handler(f: &mut fmt::Formatter<'_>, route: &Route) -> fmt::Result {
    writeln!(f, "@app.{}({})", route.method().as_str(), py_str(&route.path))?;
    match route.operation {
        Operation::List => {
            writeln!(f, "def {}():", route.function)?;
            writeln!(f, "    return service.{}()", route.function)
        }
        Operation::Create => {
            writeln!(f, "def {}(body: dict = Body(...)):", route.function)?;
            writeln!(f, "    return service.{}(body)", route.function)
        }
        Operation::Read => {
            let id = route.params();
            writeln!(f, "def {}({}: int):", route.function, id)?;
            writeln!(f, "    item = service.{}({})", route.function, id)?;
            writeln!(f, "    if item is None:")?;
            writeln!(
                f,
                "        raise HTTPException(status_code=404, detail={})",
                py_str(&format!("{} not found", route.entity))
            )?;
            writeln!(f, "    return item")
        }
    }
}
