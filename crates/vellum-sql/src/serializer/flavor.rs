use super::Serializer;

use vellum_core::driver::Dialect;

#[derive(Debug, Clone, Copy)]
pub(super) enum Flavor {
    Postgresql,
    Sqlite,
    Mysql,
}

impl Serializer {
    pub fn sqlite() -> Serializer {
        Serializer {
            flavor: Flavor::Sqlite,
        }
    }

    pub fn postgresql() -> Serializer {
        Serializer {
            flavor: Flavor::Postgresql,
        }
    }

    pub fn mysql() -> Serializer {
        Serializer {
            flavor: Flavor::Mysql,
        }
    }

    pub fn for_dialect(dialect: Dialect) -> Serializer {
        match dialect {
            Dialect::Sqlite => Self::sqlite(),
            Dialect::Postgresql => Self::postgresql(),
            Dialect::Mysql => Self::mysql(),
        }
    }

    pub(super) fn dialect(&self) -> Dialect {
        match self.flavor {
            Flavor::Postgresql => Dialect::Postgresql,
            Flavor::Sqlite => Dialect::Sqlite,
            Flavor::Mysql => Dialect::Mysql,
        }
    }
}
