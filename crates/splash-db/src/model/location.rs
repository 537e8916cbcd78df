use crate::db::schema;
use diesel::{pg::Pg, prelude::*};
use splash_core::types;

#[derive(Debug, Clone, PartialEq, Eq, Identifiable, Queryable, Selectable)]
#[diesel(table_name = schema::locations)]
#[diesel(check_for_backend(Pg))]
pub struct Location {
    pub id: uuid::Uuid,
    pub organization_id: uuid::Uuid,
    pub name: String,
    pub timezone: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Insertable)]
#[diesel(table_name = schema::locations)]
pub struct NewLocation<'a> {
    pub id: uuid::Uuid,
    pub organization_id: uuid::Uuid,
    pub name: &'a str,
    pub timezone: &'a str,
}

/// Grants a user access to a location.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Insertable)]
#[diesel(table_name = schema::user_locations)]
pub struct NewUserLocation {
    pub user_id: uuid::Uuid,
    pub location_id: uuid::Uuid,
}

impl From<Location> for types::Location {
    fn from(row: Location) -> Self {
        Self {
            id: row.id,
            organization_id: row.organization_id,
            name: row.name,
            timezone: row.timezone,
        }
    }
}
