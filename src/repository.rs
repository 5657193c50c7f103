//! User records read through a row source.

use csv_rows::RowSource;
use row_access::RecordExt;
use row_convert::{DateTimeKind, EnumSymbol, KindedDateTime};
use row_core::DataRecord;
use serde::Serialize;
use tracing::debug;

/// Account state of a user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum UserStatus {
    Active = 1,
    Suspended = 2,
    Closed = 3,
}

impl EnumSymbol for UserStatus {
    const NAME: &'static str = "UserStatus";
    const MEMBERS: &'static [(&'static str, i64)] =
        &[("Active", 1), ("Suspended", 2), ("Closed", 3)];

    fn from_bits(bits: i64) -> Option<Self> {
        match bits {
            1 => Some(Self::Active),
            2 => Some(Self::Suspended),
            3 => Some(Self::Closed),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct User {
    pub id: i32,
    pub user_name: String,
    pub first_name: String,
    pub last_name: String,
    pub status: UserStatus,
    /// Creation time, stored as UTC
    pub created_at: Option<KindedDateTime>,
}

impl User {
    /// Build a user from whatever columns `record` carries.
    ///
    /// Queries that select only some columns still produce a user; the
    /// missing fields take their defaults.
    pub fn from_record<R: DataRecord + ?Sized>(record: &R) -> Self {
        Self {
            id: record.read_or_builtin("Id"),
            user_name: record.read_or_builtin("UserName"),
            first_name: record.read_or_builtin("FirstName"),
            last_name: record.read_or_builtin("LastName"),
            status: record.read_enum("Status", UserStatus::Active),
            created_at: record.read_date_time_nullable_with_kind(
                "CreatedAt",
                DateTimeKind::Utc,
                None,
            ),
        }
    }
}

/// Data access for users. Owns the row source it reads from.
pub struct UserRepository<S> {
    source: S,
}

impl<S: RowSource> UserRepository<S> {
    pub fn new(source: S) -> Self {
        Self { source }
    }

    pub fn get_users(&self) -> Result<Vec<User>, S::Error> {
        let rows = self.source.read_rows()?;
        debug!("Mapping {} rows to users", rows.len());
        Ok(rows.iter().map(User::from_record).collect())
    }
}
