use crate::domain::model::{Phase, Statement, Table};

/// songplays 的比對條件：歌名、歌手名、長度
pub const SONGPLAY_JOIN_KEYS: [(&str, &str); 3] = [
    ("se.song", "ss.title"),
    ("se.artist", "ss.artist_name"),
    ("se.length", "ss.duration"),
];

/// time 維度從 ts 取出的欄位
pub const TIME_FIELDS: [&str; 6] = ["hour", "day", "week", "month", "year", "weekday"];

struct InsertSelect<'a> {
    target: Table,
    /// (目標欄位, 來源運算式)
    columns: Vec<(&'a str, String)>,
    distinct: bool,
    from: String,
    filter: Option<&'a str>,
}

impl InsertSelect<'_> {
    fn render(&self) -> String {
        let targets = self
            .columns
            .iter()
            .map(|(column, _)| format!("    {}", column))
            .collect::<Vec<_>>()
            .join(",\n");

        let projections = self
            .columns
            .iter()
            .map(|(column, expr)| {
                if expr == column {
                    format!("    {}", expr)
                } else {
                    format!("    {} AS {}", expr, column)
                }
            })
            .collect::<Vec<_>>()
            .join(",\n");

        let mut sql = format!(
            "INSERT INTO {} (\n{}\n)\nSELECT{}\n{}\nFROM {}",
            self.target.name(),
            targets,
            if self.distinct { " DISTINCT" } else { "" },
            projections,
            self.from,
        );
        if let Some(filter) = self.filter {
            sql.push_str("\nWHERE ");
            sql.push_str(filter);
        }
        sql.push(';');
        sql
    }
}

fn owned<'a>(pairs: &[(&'a str, &str)]) -> Vec<(&'a str, String)> {
    pairs
        .iter()
        .map(|(column, expr)| (*column, expr.to_string()))
        .collect()
}

pub fn songplay_table_insert() -> String {
    let predicate = SONGPLAY_JOIN_KEYS
        .iter()
        .enumerate()
        .map(|(i, (left, right))| {
            let keyword = if i == 0 { "ON" } else { "AND" };
            format!("    {} {} = {}", keyword, left, right)
        })
        .collect::<Vec<_>>()
        .join("\n");

    InsertSelect {
        target: Table::Songplays,
        columns: owned(&[
            ("start_time", "se.ts"),
            ("user_id", "se.userId"),
            ("level", "se.level"),
            ("song_id", "ss.song_id"),
            ("artist_id", "ss.artist_id"),
            ("session_id", "se.sessionId"),
            ("location", "se.location"),
            ("user_agent", "se.userAgent"),
        ]),
        distinct: false,
        from: format!("staging_events se\nJOIN staging_songs ss\n{}", predicate),
        filter: None,
    }
    .render()
}

pub fn user_table_insert() -> String {
    InsertSelect {
        target: Table::Users,
        columns: owned(&[
            ("user_id", "userId"),
            ("first_name", "firstName"),
            ("last_name", "lastName"),
            ("gender", "gender"),
            ("level", "level"),
        ]),
        distinct: true,
        from: Table::StagingEvents.name().to_string(),
        filter: Some("userId IS NOT NULL"),
    }
    .render()
}

pub fn song_table_insert() -> String {
    InsertSelect {
        target: Table::Songs,
        columns: owned(&[
            ("song_id", "song_id"),
            ("title", "title"),
            ("artist_id", "artist_id"),
            ("year", "year"),
            ("duration", "duration"),
        ]),
        distinct: true,
        from: Table::StagingSongs.name().to_string(),
        filter: None,
    }
    .render()
}

pub fn artist_table_insert() -> String {
    InsertSelect {
        target: Table::Artists,
        columns: owned(&[
            ("artist_id", "artist_id"),
            ("name", "artist_name"),
            ("location", "artist_location"),
            ("latitude", "artist_latitude"),
            ("longitude", "artist_longitude"),
        ]),
        distinct: true,
        from: Table::StagingSongs.name().to_string(),
        filter: None,
    }
    .render()
}

pub fn time_table_insert() -> String {
    let mut columns = vec![("start_time", "ts".to_string())];
    columns.extend(
        TIME_FIELDS
            .iter()
            .map(|field| (*field, format!("EXTRACT({} FROM ts)", field))),
    );

    InsertSelect {
        target: Table::Time,
        columns,
        distinct: true,
        from: Table::StagingEvents.name().to_string(),
        filter: None,
    }
    .render()
}

pub fn insert_table_queries() -> Vec<Statement> {
    vec![
        Statement::new(
            "songplay_table_insert",
            Phase::Insert,
            Table::Songplays,
            songplay_table_insert(),
        ),
        Statement::new("user_table_insert", Phase::Insert, Table::Users, user_table_insert()),
        Statement::new("song_table_insert", Phase::Insert, Table::Songs, song_table_insert()),
        Statement::new(
            "artist_table_insert",
            Phase::Insert,
            Table::Artists,
            artist_table_insert(),
        ),
        Statement::new("time_table_insert", Phase::Insert, Table::Time, time_table_insert()),
    ]
}
