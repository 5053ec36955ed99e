use crate::domain::model::{Phase, Statement, Table};
use std::fmt;
use Constraint::{DistKey, NotNull, PrimaryKey, SortKey};

/// 欄位修飾詞，依宣告順序輸出
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Constraint {
    Identity { seed: i64, step: i64 },
    PrimaryKey,
    NotNull,
    SortKey,
    DistKey,
}

impl fmt::Display for Constraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Constraint::Identity { seed, step } => write!(f, "IDENTITY({},{})", seed, step),
            Constraint::PrimaryKey => f.write_str("PRIMARY KEY"),
            Constraint::NotNull => f.write_str("NOT NULL"),
            Constraint::SortKey => f.write_str("SORTKEY"),
            Constraint::DistKey => f.write_str("DISTKEY"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Column {
    pub name: &'static str,
    pub data_type: &'static str,
    pub constraints: &'static [Constraint],
}

impl Column {
    pub fn has(&self, constraint: Constraint) -> bool {
        self.constraints.contains(&constraint)
    }

    fn definition(&self) -> String {
        let mut definition = self.data_type.to_string();
        for constraint in self.constraints {
            definition.push(' ');
            definition.push_str(&constraint.to_string());
        }
        definition
    }
}

const fn col(name: &'static str, data_type: &'static str) -> Column {
    Column {
        name,
        data_type,
        constraints: &[],
    }
}

const fn col_with(
    name: &'static str,
    data_type: &'static str,
    constraints: &'static [Constraint],
) -> Column {
    Column {
        name,
        data_type,
        constraints,
    }
}

#[derive(Debug, Clone, Copy)]
pub struct TableDef {
    pub table: Table,
    pub columns: &'static [Column],
}

impl TableDef {
    pub fn name(&self) -> &'static str {
        self.table.name()
    }

    pub fn distkey(&self) -> Option<&Column> {
        self.columns.iter().find(|c| c.has(Constraint::DistKey))
    }

    pub fn sortkey(&self) -> Option<&Column> {
        self.columns.iter().find(|c| c.has(Constraint::SortKey))
    }

    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }

    pub fn drop_sql(&self) -> String {
        format!("DROP TABLE IF EXISTS {}", self.name())
    }

    pub fn create_sql(&self) -> String {
        let width = self.columns.iter().map(|c| c.name.len()).max().unwrap_or(0);
        let columns = self
            .columns
            .iter()
            .map(|c| format!("    {:<width$} {}", c.name, c.definition(), width = width))
            .collect::<Vec<_>>()
            .join(",\n");

        format!("CREATE TABLE IF NOT EXISTS {} (\n{}\n)", self.name(), columns)
    }
}

pub const STAGING_EVENTS: TableDef = TableDef {
    table: Table::StagingEvents,
    columns: &[
        col("artist", "VARCHAR"),
        col("auth", "VARCHAR"),
        col("firstName", "VARCHAR"),
        col("gender", "VARCHAR"),
        col("itemInSession", "INT"),
        col("lastName", "VARCHAR"),
        col("length", "DECIMAL"),
        col("level", "VARCHAR"),
        col("location", "VARCHAR"),
        col("method", "VARCHAR"),
        col("page", "VARCHAR"),
        col("registration", "DECIMAL"),
        col("sessionId", "INT"),
        col_with("song", "VARCHAR", &[DistKey]),
        col("status", "INT"),
        col("ts", "TIMESTAMP"),
        col("userAgent", "VARCHAR"),
        col("userId", "INT"),
    ],
};

pub const STAGING_SONGS: TableDef = TableDef {
    table: Table::StagingSongs,
    columns: &[
        col("num_songs", "INT"),
        col("artist_id", "VARCHAR"),
        col("artist_latitude", "DECIMAL"),
        col("artist_longitude", "DECIMAL"),
        col("artist_location", "VARCHAR"),
        col("artist_name", "VARCHAR"),
        col("song_id", "VARCHAR"),
        col_with("title", "VARCHAR", &[DistKey]),
        col("duration", "DECIMAL"),
        col("year", "INT"),
    ],
};

pub const SONGPLAYS: TableDef = TableDef {
    table: Table::Songplays,
    columns: &[
        col_with(
            "songplay_id",
            "INT",
            &[Constraint::Identity { seed: 0, step: 1 }, PrimaryKey],
        ),
        col_with("start_time", "TIMESTAMP", &[NotNull, SortKey]),
        col_with("user_id", "INT", &[NotNull]),
        col_with("level", "VARCHAR", &[NotNull]),
        col("song_id", "VARCHAR"),
        col("artist_id", "VARCHAR"),
        col_with("session_id", "INT", &[NotNull]),
        col_with("location", "VARCHAR", &[NotNull]),
        col_with("user_agent", "VARCHAR", &[NotNull]),
    ],
};

pub const USERS: TableDef = TableDef {
    table: Table::Users,
    columns: &[
        col_with("user_id", "INT", &[PrimaryKey, DistKey]),
        col("first_name", "VARCHAR"),
        col("last_name", "VARCHAR"),
        col("gender", "VARCHAR"),
        col("level", "VARCHAR"),
    ],
};

pub const SONGS: TableDef = TableDef {
    table: Table::Songs,
    columns: &[
        col_with("song_id", "VARCHAR", &[PrimaryKey]),
        col("title", "VARCHAR"),
        col_with("artist_id", "VARCHAR", &[DistKey]),
        col("year", "INT"),
        col("duration", "NUMERIC"),
    ],
};

pub const ARTISTS: TableDef = TableDef {
    table: Table::Artists,
    columns: &[
        col_with("artist_id", "VARCHAR", &[PrimaryKey, DistKey]),
        col("name", "VARCHAR"),
        col("location", "VARCHAR"),
        col("latitude", "NUMERIC"),
        col("longitude", "NUMERIC"),
    ],
};

pub const TIME: TableDef = TableDef {
    table: Table::Time,
    columns: &[
        col_with("start_time", "TIMESTAMP", &[PrimaryKey, SortKey, DistKey]),
        col("hour", "INT"),
        col("day", "INT"),
        col("week", "INT"),
        col("month", "INT"),
        col("year", "INT"),
        col("weekday", "INT"),
    ],
};

/// 與 `Table::ALL` 同順序
pub const TABLES: [TableDef; 7] = [
    STAGING_EVENTS,
    STAGING_SONGS,
    SONGPLAYS,
    USERS,
    SONGS,
    ARTISTS,
    TIME,
];

pub fn table_def(table: Table) -> &'static TableDef {
    match table {
        Table::StagingEvents => &STAGING_EVENTS,
        Table::StagingSongs => &STAGING_SONGS,
        Table::Songplays => &SONGPLAYS,
        Table::Users => &USERS,
        Table::Songs => &SONGS,
        Table::Artists => &ARTISTS,
        Table::Time => &TIME,
    }
}

pub fn drop_table_queries() -> Vec<Statement> {
    TABLES
        .iter()
        .map(|def| {
            Statement::new(
                format!("{}_table_drop", def.table.stem()),
                Phase::Drop,
                def.table,
                def.drop_sql(),
            )
        })
        .collect()
}

pub fn create_table_queries() -> Vec<Statement> {
    TABLES
        .iter()
        .map(|def| {
            Statement::new(
                format!("{}_table_create", def.table.stem()),
                Phase::Create,
                def.table,
                def.create_sql(),
            )
        })
        .collect()
}
