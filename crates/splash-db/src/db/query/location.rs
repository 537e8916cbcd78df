//! Location and membership queries.

use diesel::prelude::*;
use diesel_async::{AsyncPgConnection, RunQueryDsl};

use crate::db::schema::{locations, organizations, user_locations};
use crate::model::location::{Location, NewLocation, NewUserLocation};
use crate::model::organization::{NewOrganization, Organization};

/// ## Summary
/// Finds a location by ID if the user is a member of it.
///
/// ## Errors
/// Returns a database error if the query fails.
pub async fn find_for_member(
    conn: &mut AsyncPgConnection,
    user_id: uuid::Uuid,
    location_id: uuid::Uuid,
) -> diesel::QueryResult<Option<Location>> {
    locations::table
        .inner_join(user_locations::table)
        .filter(user_locations::user_id.eq(user_id))
        .filter(locations::id.eq(location_id))
        .select(Location::as_select())
        .first(conn)
        .await
        .optional()
}

/// ## Errors
/// Returns a database error if the insert fails.
pub async fn insert_organization(
    conn: &mut AsyncPgConnection,
    organization: &NewOrganization<'_>,
) -> diesel::QueryResult<Organization> {
    diesel::insert_into(organizations::table)
        .values(organization)
        .returning(Organization::as_returning())
        .get_result(conn)
        .await
}

/// ## Errors
/// Returns a database error if the insert fails.
pub async fn insert_location(
    conn: &mut AsyncPgConnection,
    location: &NewLocation<'_>,
) -> diesel::QueryResult<Location> {
    diesel::insert_into(locations::table)
        .values(location)
        .returning(Location::as_returning())
        .get_result(conn)
        .await
}

/// ## Summary
/// Adds the user to the location. Granting twice is a no-op.
///
/// ## Errors
/// Returns a database error if the insert fails.
pub async fn grant_access(
    conn: &mut AsyncPgConnection,
    membership: NewUserLocation,
) -> diesel::QueryResult<()> {
    diesel::insert_into(user_locations::table)
        .values(&membership)
        .on_conflict_do_nothing()
        .execute(conn)
        .await?;
    Ok(())
}
