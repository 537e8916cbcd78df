//! Database enum types with Diesel serialization.
//!
//! Each enum maps a `CHECK`-constrained text column and converts to the
//! matching domain type in `splash_core`.

use diesel::deserialize::{self, FromSql, FromSqlRow};
use diesel::expression::AsExpression;
use diesel::pg::{Pg, PgValue};
use diesel::serialize::{self, IsNull, Output, ToSql};
use diesel::sql_types::Text;
use std::io::Write;

use splash_core::types;

/// Maps to `sessions.status`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, AsExpression, FromSqlRow)]
#[diesel(sql_type = Text)]
pub enum SessionStatus {
    #[default]
    Draft,
    Active,
    Disabled,
}

impl ToSql<Text, Pg> for SessionStatus {
    fn to_sql<'b>(&'b self, out: &mut Output<'b, '_, Pg>) -> serialize::Result {
        out.write_all(types::SessionStatus::from(*self).as_str().as_bytes())?;
        Ok(IsNull::No)
    }
}

impl FromSql<Text, Pg> for SessionStatus {
    fn from_sql(bytes: PgValue<'_>) -> deserialize::Result<Self> {
        match bytes.as_bytes() {
            b"draft" => Ok(Self::Draft),
            b"active" => Ok(Self::Active),
            b"disabled" => Ok(Self::Disabled),
            _ => Err("Unrecognized enum variant".into()),
        }
    }
}

impl From<SessionStatus> for types::SessionStatus {
    fn from(value: SessionStatus) -> Self {
        match value {
            SessionStatus::Draft => Self::Draft,
            SessionStatus::Active => Self::Active,
            SessionStatus::Disabled => Self::Disabled,
        }
    }
}

impl From<types::SessionStatus> for SessionStatus {
    fn from(value: types::SessionStatus) -> Self {
        match value {
            types::SessionStatus::Draft => Self::Draft,
            types::SessionStatus::Active => Self::Active,
            types::SessionStatus::Disabled => Self::Disabled,
        }
    }
}
