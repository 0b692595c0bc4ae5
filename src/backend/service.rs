//! Service layer: one pass-through per route, same signature as the data-access function it calls.

use super::Route;
use std::fmt;

pub struct ServiceModule<'a> {
    pub routes: &'a [Route],
}

impl fmt::Display for ServiceModule<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "from app import database")?;
        for route in self.routes {
            writeln!(f)?;
            writeln!(f)?;
            writeln!(f, "def {}({}):", route.function, route.params())?;
            writeln!(f, "    return database.{}({})", route.function, route.params())?;
        }
        Ok(())
    }
}
