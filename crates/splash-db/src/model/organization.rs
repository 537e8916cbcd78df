use crate::db::schema;
use diesel::{pg::Pg, prelude::*};

#[derive(Debug, Clone, PartialEq, Eq, Identifiable, Queryable, Selectable)]
#[diesel(table_name = schema::organizations)]
#[diesel(check_for_backend(Pg))]
pub struct Organization {
    pub id: uuid::Uuid,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Insertable)]
#[diesel(table_name = schema::organizations)]
pub struct NewOrganization<'a> {
    pub id: uuid::Uuid,
    pub name: &'a str,
}
