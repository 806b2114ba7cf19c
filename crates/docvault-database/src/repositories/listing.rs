//! SQL for document visibility and listings.
//!
//! Every statement that reads documents on behalf of a user goes through
//! this module, so the visibility predicate exists in exactly one place:
//!
//! ```text
//! visible(d, u) = d.owner_id = u OR d.is_public OR grant(d.id, u)
//! ```
//!
//! Filter columns come from [`DocumentField::column`], a closed set of
//! static strings. Filter values, ids and paging are always bound.

use sqlx::{Postgres, QueryBuilder};
use uuid::Uuid;

use docvault_core::types::{DocumentField, DocumentFilter, ListParams, ListingScope};

/// Columns selected for every document row.
pub const DOCUMENT_COLUMNS: &str = "d.id, d.name, d.mime, d.file_path, d.is_file, d.is_public, \
     d.document_data, d.owner_id, d.created_at";

/// Sorted grantee logins, the owner included, as a `TEXT[]` named `grants`.
pub const GRANTS_COLUMN: &str = "COALESCE((SELECT ARRAY_AGG(u.login ORDER BY u.login) \
     FROM access_grants g JOIN users u ON u.id = g.user_id \
     WHERE g.document_id = d.id), ARRAY[]::TEXT[]) AS grants";

/// Single document lookup for a viewer: binds `$1` = document id,
/// `$2` = viewer.
pub const FIND_VISIBLE_SQL: &str = "SELECT d.id, d.name, d.mime, d.file_path, d.is_file, \
     d.is_public, d.document_data, d.owner_id, d.created_at, \
     COALESCE((SELECT ARRAY_AGG(u.login ORDER BY u.login) \
     FROM access_grants g JOIN users u ON u.id = g.user_id \
     WHERE g.document_id = d.id), ARRAY[]::TEXT[]) AS grants \
     FROM documents d \
     WHERE d.id = $1 AND (d.owner_id = $2 OR d.is_public OR EXISTS \
     (SELECT 1 FROM access_grants ag WHERE ag.document_id = d.id AND ag.user_id = $2))";

/// Existence check for a viewer: binds `$1` = document id, `$2` = viewer.
pub const EXISTS_VISIBLE_SQL: &str = "SELECT EXISTS (SELECT 1 FROM documents d \
     WHERE d.id = $1 AND (d.owner_id = $2 OR d.is_public OR EXISTS \
     (SELECT 1 FROM access_grants ag WHERE ag.document_id = d.id AND ag.user_id = $2)))";

/// Build one page of a listing.
///
/// * [`ListingScope::Owned`]: every document the owner holds.
/// * [`ListingScope::SharedBy`]: the owner's documents that are public or
///   granted to the viewer.
///
/// Results are ordered by `created_at`, then `id` so that rows created in
/// the same instant still page deterministically.
pub fn listing_query(
    scope: ListingScope,
    filter: Option<&DocumentFilter>,
    params: ListParams,
) -> QueryBuilder<'static, Postgres> {
    let mut qb = QueryBuilder::new("SELECT ");
    qb.push(DOCUMENT_COLUMNS)
        .push(", ")
        .push(GRANTS_COLUMN)
        .push(" FROM documents d WHERE d.owner_id = ")
        .push_bind(scope.owner());

    if let ListingScope::SharedBy { viewer, .. } = scope {
        push_shared_with(&mut qb, viewer);
    }

    if let Some(filter) = filter {
        push_filter(&mut qb, filter.field, filter.like_pattern());
    }

    qb.push(" ORDER BY d.created_at ASC, d.id ASC LIMIT ")
        .push_bind(params.limit())
        .push(" OFFSET ")
        .push_bind(params.offset());
    qb
}

fn push_shared_with(qb: &mut QueryBuilder<'static, Postgres>, viewer: Uuid) {
    qb.push(
        " AND (d.is_public OR EXISTS (SELECT 1 FROM access_grants ag \
         WHERE ag.document_id = d.id AND ag.user_id = ",
    )
    .push_bind(viewer)
    .push("))");
}

fn push_filter(qb: &mut QueryBuilder<'static, Postgres>, field: DocumentField, pattern: String) {
    qb.push(" AND CAST(")
        .push(field.column())
        .push(" AS TEXT) LIKE ")
        .push_bind(pattern);
}
