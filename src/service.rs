//! User lookups on top of a repository.

use csv_rows::RowSource;

use crate::repository::{User, UserRepository, UserStatus};

/// Read-side operations over users.
///
/// Borrows its repository, so one repository can back several services.
pub struct UserService<'a, S> {
    repository: &'a UserRepository<S>,
}

impl<'a, S: RowSource> UserService<'a, S> {
    pub fn new(repository: &'a UserRepository<S>) -> Self {
        Self { repository }
    }

    pub fn get_users(&self) -> Result<Vec<User>, S::Error> {
        self.repository.get_users()
    }

    /// First user whose user name matches `user_name`, ignoring case.
    pub fn find_by_user_name(&self, user_name: &str) -> Result<Option<User>, S::Error> {
        Ok(self
            .get_users()?
            .into_iter()
            .find(|user| user.user_name.eq_ignore_ascii_case(user_name)))
    }

    pub fn get_users_with_status(&self, status: UserStatus) -> Result<Vec<User>, S::Error> {
        Ok(self
            .get_users()?
            .into_iter()
            .filter(|user| user.status == status)
            .collect())
    }
}
