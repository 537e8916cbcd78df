use crate::db::schema;
use crate::model::session::Session;
use chrono::{DateTime, Utc};
use diesel::{pg::Pg, prelude::*};
use splash_core::types;

/// A row of `user_sessions`: one user holding one occurrence of a session.
#[derive(Debug, Clone, PartialEq, Eq, Identifiable, Queryable, Selectable, Associations)]
#[diesel(table_name = schema::user_sessions)]
#[diesel(check_for_backend(Pg))]
#[diesel(belongs_to(Session, foreign_key = session_id))]
pub struct Reservation {
    pub id: i64,
    pub user_id: uuid::Uuid,
    pub session_id: uuid::Uuid,
    pub instance_datetime: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Insertable)]
#[diesel(table_name = schema::user_sessions)]
pub struct NewReservation {
    pub user_id: uuid::Uuid,
    pub session_id: uuid::Uuid,
    pub instance_datetime: DateTime<Utc>,
}

impl From<Reservation> for types::Reservation {
    fn from(row: Reservation) -> Self {
        Self {
            id: row.id,
            session_id: row.session_id,
            user_id: row.user_id,
            instance_datetime: row.instance_datetime,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

impl From<types::NewReservation> for NewReservation {
    fn from(value: types::NewReservation) -> Self {
        Self {
            user_id: value.user_id,
            session_id: value.session_id,
            instance_datetime: value.instance_datetime,
        }
    }
}
