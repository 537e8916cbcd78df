use crate::db::{enums::SessionStatus, schema};
use crate::model::location::Location;
use chrono::{NaiveDate, NaiveTime};
use diesel::{pg::Pg, prelude::*};
use splash_core::types;

#[derive(Debug, Clone, PartialEq, Eq, Identifiable, Queryable, Selectable, Associations)]
#[diesel(table_name = schema::sessions)]
#[diesel(check_for_backend(Pg))]
#[diesel(belongs_to(Location, foreign_key = location_id))]
pub struct Session {
    pub id: uuid::Uuid,
    pub location_id: uuid::Uuid,
    pub title: String,
    pub description: Option<String>,
    pub start_date: NaiveDate,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub rrule: Option<String>,
    pub status: SessionStatus,
}

#[derive(Debug, Clone, PartialEq, Eq, Insertable)]
#[diesel(table_name = schema::sessions)]
pub struct NewSession<'a> {
    pub id: uuid::Uuid,
    pub location_id: uuid::Uuid,
    pub title: &'a str,
    pub description: Option<&'a str>,
    pub start_date: NaiveDate,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub rrule: Option<&'a str>,
    pub status: SessionStatus,
}

impl From<Session> for types::Session {
    fn from(row: Session) -> Self {
        Self {
            id: row.id,
            location_id: row.location_id,
            title: row.title,
            description: row.description,
            start_date: row.start_date,
            start_time: row.start_time,
            end_time: row.end_time,
            recurrence_rule: row.rrule,
            status: row.status.into(),
        }
    }
}

impl<'a> From<&'a types::Session> for NewSession<'a> {
    fn from(session: &'a types::Session) -> Self {
        Self {
            id: session.id,
            location_id: session.location_id,
            title: &session.title,
            description: session.description.as_deref(),
            start_date: session.start_date,
            start_time: session.start_time,
            end_time: session.end_time,
            rrule: session.recurrence_rule(),
            status: session.status.into(),
        }
    }
}
