use crate::config::warehouse::WarehouseConfig;
use crate::domain::model::{Phase, Stage, Statement};
use crate::sql::{copy, ddl, insert};

/// 四組依序執行的語句：drop、create、copy、insert
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryCatalog {
    drop_table_queries: Vec<Statement>,
    create_table_queries: Vec<Statement>,
    copy_table_queries: Vec<Statement>,
    insert_table_queries: Vec<Statement>,
}

impl QueryCatalog {
    pub fn build(config: &WarehouseConfig) -> Self {
        Self {
            drop_table_queries: ddl::drop_table_queries(),
            create_table_queries: ddl::create_table_queries(),
            copy_table_queries: copy::copy_table_queries(config),
            insert_table_queries: insert::insert_table_queries(),
        }
    }

    pub fn drop_table_queries(&self) -> &[Statement] {
        &self.drop_table_queries
    }

    pub fn create_table_queries(&self) -> &[Statement] {
        &self.create_table_queries
    }

    pub fn copy_table_queries(&self) -> &[Statement] {
        &self.copy_table_queries
    }

    pub fn insert_table_queries(&self) -> &[Statement] {
        &self.insert_table_queries
    }

    pub fn phase(&self, phase: Phase) -> &[Statement] {
        match phase {
            Phase::Drop => &self.drop_table_queries,
            Phase::Create => &self.create_table_queries,
            Phase::Copy => &self.copy_table_queries,
            Phase::Insert => &self.insert_table_queries,
        }
    }

    /// 只取 SQL 字串
    pub fn sql(&self, phase: Phase) -> Vec<&str> {
        self.phase(phase).iter().map(Statement::sql).collect()
    }

    /// 依執行順序列出 stage 內的所有語句
    pub fn statements(&self, stage: Stage) -> impl Iterator<Item = &Statement> + '_ {
        stage
            .phases()
            .iter()
            .flat_map(move |phase| self.phase(*phase).iter())
    }

    pub fn len(&self, stage: Stage) -> usize {
        stage.phases().iter().map(|phase| self.phase(*phase).len()).sum()
    }

    pub fn is_empty(&self, stage: Stage) -> bool {
        self.len(stage) == 0
    }

    pub fn phase_script(&self, phase: Phase) -> String {
        let statements = self.phase(phase);
        let mut script = format!(
            "-- {:02} {}: {} statements\n",
            phase.position(),
            phase.label(),
            statements.len()
        );
        for statement in statements {
            script.push('\n');
            script.push_str(&statement.terminated());
            script.push('\n');
        }
        script
    }

    pub fn script(&self, stage: Stage) -> String {
        stage
            .phases()
            .iter()
            .map(|phase| self.phase_script(*phase))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::warehouse::{IamRoleConfig, S3Config};

    fn catalog() -> QueryCatalog {
        QueryCatalog::build(&WarehouseConfig {
            s3: S3Config {
                log_data: "s3://bucket/log_data".to_string(),
                song_data: "s3://bucket/song_data".to_string(),
                log_jsonpath: "auto".to_string(),
                region: None,
            },
            iam_role: IamRoleConfig {
                arn: "arn:aws:iam::123456789012:role/dwhRole".to_string(),
            },
        })
    }

    #[test]
    fn test_phase_sizes() {
        let catalog = catalog();
        assert_eq!(catalog.drop_table_queries().len(), 7);
        assert_eq!(catalog.create_table_queries().len(), 7);
        assert_eq!(catalog.copy_table_queries().len(), 2);
        assert_eq!(catalog.insert_table_queries().len(), 5);
        assert_eq!(catalog.len(Stage::All), 21);
        assert_eq!(catalog.len(Stage::Reset), 14);
        assert_eq!(catalog.len(Stage::Load), 7);
    }

    #[test]
    fn test_statements_follow_phase_order() {
        let catalog = catalog();
        let phases: Vec<Phase> = catalog.statements(Stage::All).map(|s| s.phase).collect();
        let mut sorted = phases.clone();
        sorted.sort();
        assert_eq!(phases, sorted);

        assert!(catalog.statements(Stage::Load).all(|s| s.phase >= Phase::Copy));
    }

    #[test]
    fn test_phase_script_terminates_every_statement() {
        let script = catalog().phase_script(Phase::Drop);

        assert!(script.starts_with("-- 01 drop: 7 statements\n"));
        assert!(script.contains("\nDROP TABLE IF EXISTS staging_events;\n"));
        assert_eq!(script.matches(';').count(), 7);
    }

    #[test]
    fn test_reset_script_has_no_copy() {
        let script = catalog().script(Stage::Reset);
        assert!(script.contains("-- 02 create: 7 statements"));
        assert!(!script.contains("COPY"));
        assert!(!script.contains("INSERT INTO"));
    }
}
