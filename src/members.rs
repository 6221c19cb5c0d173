use chrono::NaiveDate;

use crate::domain::entities::record::{CellValue, Record};
use crate::domain::entities::table::ColumnDef;

/// A row of the members admin list.
#[derive(Debug, Clone, PartialEq)]
pub struct Member {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub post: Option<String>,
    pub class_year: i64,
    pub joined: NaiveDate,
    pub active: bool,
}

impl Record for Member {
    fn field(&self, key: &str) -> Option<CellValue> {
        match key {
            "id" => Some(self.id.into()),
            "name" => Some(self.name.as_str().into()),
            "email" => Some(self.email.as_str().into()),
            "post" => self.post.as_deref().map(CellValue::from),
            "class_year" => Some(self.class_year.into()),
            "joined" => Some(self.joined.into()),
            "active" => Some(self.active.into()),
            _ => None,
        }
    }
}

pub fn member_columns() -> Vec<ColumnDef> {
    vec![
        ColumnDef::new("name", "Name"),
        ColumnDef::new("email", "Email"),
        ColumnDef::new("post", "Post").with_renderer(|value| match value {
            Some(value) => value.to_string(),
            None => "-".to_string(),
        }),
        ColumnDef::new("class_year", "Class"),
        ColumnDef::new("joined", "Joined"),
        ColumnDef::new("active", "Active")
            .with_renderer(|value| match value {
                Some(CellValue::Bool(true)) => "yes".to_string(),
                _ => "no".to_string(),
            })
            .sortable(false),
    ]
}

fn member(
    id: i64,
    name: &str,
    post: Option<&str>,
    class_year: i64,
    joined: (i32, u32, u32),
    active: bool,
) -> Option<Member> {
    let (year, month, day) = joined;
    Some(Member {
        id,
        name: name.to_string(),
        email: format!("{}@union.example", name.to_lowercase().replace(' ', ".")),
        post: post.map(str::to_string),
        class_year,
        joined: NaiveDate::from_ymd_opt(year, month, day)?,
        active,
    })
}

/// Demo rows for the members page.
pub fn sample_members() -> Vec<Member> {
    [
        member(1, "Alva Lind", Some("Board"), 2022, (2022, 8, 29), true),
        member(2, "Viktor Berg", Some("Treasurer"), 2021, (2021, 8, 30), true),
        member(3, "Maja Ek", Some("Board"), 2023, (2023, 8, 28), true),
        member(4, "Oskar Holm", None, 2024, (2024, 9, 2), true),
        member(5, "Elsa Nyberg", Some("Events"), 2022, (2022, 9, 5), false),
        member(6, "Hugo Sand", Some("Events"), 2023, (2023, 9, 4), true),
        member(7, "Ines Dahl", Some("Communications"), 2021, (2021, 9, 6), false),
        member(8, "Leo Fors", None, 2024, (2024, 9, 9), true),
        member(9, "Wilma Strand", Some("Board"), 2024, (2024, 8, 26), true),
        member(10, "Nils Ahl", Some("Treasurer"), 2020, (2020, 8, 31), false),
        member(11, "Saga Rask", Some("Communications"), 2023, (2023, 10, 2), true),
        member(12, "Axel Vik", Some("Events"), 2024, (2024, 10, 7), true),
    ]
    .into_iter()
    .flatten()
    .collect()
}
