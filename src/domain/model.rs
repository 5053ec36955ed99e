use serde::Serialize;
use std::fmt;

/// 星狀模型中的所有資料表
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Table {
    StagingEvents,
    StagingSongs,
    Songplays,
    Users,
    Songs,
    Artists,
    Time,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TableKind {
    Staging,
    Dimension,
    Fact,
}

impl Table {
    /// 建表（以及刪表）的順序
    pub const ALL: [Table; 7] = [
        Table::StagingEvents,
        Table::StagingSongs,
        Table::Songplays,
        Table::Users,
        Table::Songs,
        Table::Artists,
        Table::Time,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Table::StagingEvents => "staging_events",
            Table::StagingSongs => "staging_songs",
            Table::Songplays => "songplays",
            Table::Users => "users",
            Table::Songs => "songs",
            Table::Artists => "artists",
            Table::Time => "time",
        }
    }

    /// 語句命名用的字根，例如 `user_table_insert`
    pub fn stem(&self) -> &'static str {
        match self {
            Table::StagingEvents => "staging_events",
            Table::StagingSongs => "staging_songs",
            Table::Songplays => "songplay",
            Table::Users => "user",
            Table::Songs => "song",
            Table::Artists => "artist",
            Table::Time => "time",
        }
    }

    pub fn kind(&self) -> TableKind {
        match self {
            Table::StagingEvents | Table::StagingSongs => TableKind::Staging,
            Table::Songplays => TableKind::Fact,
            Table::Users | Table::Songs | Table::Artists | Table::Time => TableKind::Dimension,
        }
    }
}

impl fmt::Display for Table {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// 執行階段，排序即執行順序
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    Drop,
    Create,
    Copy,
    Insert,
}

impl Phase {
    pub const ALL: [Phase; 4] = [Phase::Drop, Phase::Create, Phase::Copy, Phase::Insert];

    pub fn position(&self) -> usize {
        match self {
            Phase::Drop => 1,
            Phase::Create => 2,
            Phase::Copy => 3,
            Phase::Insert => 4,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Phase::Drop => "drop",
            Phase::Create => "create",
            Phase::Copy => "copy",
            Phase::Insert => "insert",
        }
    }

    pub fn script_file_name(&self) -> &'static str {
        match self {
            Phase::Drop => "01_drop_tables.sql",
            Phase::Create => "02_create_tables.sql",
            Phase::Copy => "03_copy_staging_tables.sql",
            Phase::Insert => "04_insert_tables.sql",
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// 要輸出的階段組合
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    /// drop + create
    Reset,
    /// copy + insert
    Load,
    #[default]
    All,
}

impl Stage {
    pub fn phases(&self) -> &'static [Phase] {
        match self {
            Stage::Reset => &[Phase::Drop, Phase::Create],
            Stage::Load => &[Phase::Copy, Phase::Insert],
            Stage::All => &Phase::ALL,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    Sql,
    Json,
    Csv,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Statement {
    pub name: String,
    pub phase: Phase,
    pub table: Table,
    pub sql: String,
}

impl Statement {
    pub fn new(name: impl Into<String>, phase: Phase, table: Table, sql: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            phase,
            table,
            sql: sql.into(),
        }
    }

    pub fn sql(&self) -> &str {
        &self.sql
    }

    /// 以分號結尾的語句，可直接放進腳本
    pub fn terminated(&self) -> String {
        let sql = self.sql.trim_end();
        if sql.ends_with(';') {
            sql.to_string()
        } else {
            format!("{};", sql)
        }
    }
}

impl fmt::Display for Statement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.sql)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_phase_order_matches_execution_order() {
        let mut phases = Phase::ALL.to_vec();
        phases.sort();
        assert_eq!(phases, Phase::ALL.to_vec());
        assert_eq!(
            Phase::ALL.iter().map(|p| p.position()).collect::<Vec<_>>(),
            vec![1, 2, 3, 4]
        );
    }

    #[test]
    fn test_stage_phases() {
        assert_eq!(Stage::Reset.phases(), &[Phase::Drop, Phase::Create]);
        assert_eq!(Stage::Load.phases(), &[Phase::Copy, Phase::Insert]);
        assert_eq!(Stage::default().phases().len(), 4);
    }

    #[test]
    fn test_terminated_adds_semicolon_once() {
        let drop = Statement::new("x", Phase::Drop, Table::Users, "DROP TABLE IF EXISTS users");
        assert_eq!(drop.terminated(), "DROP TABLE IF EXISTS users;");

        let insert = Statement::new("y", Phase::Insert, Table::Users, "SELECT 1;\n");
        assert_eq!(insert.terminated(), "SELECT 1;");
    }

    #[test]
    fn test_table_kinds() {
        assert_eq!(Table::Songplays.kind(), TableKind::Fact);
        assert_eq!(Table::StagingSongs.kind(), TableKind::Staging);
        assert_eq!(Table::Time.kind(), TableKind::Dimension);
        assert_eq!(Table::Users.to_string(), "users");
    }
}
