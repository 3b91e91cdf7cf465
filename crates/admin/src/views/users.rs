//! Customer account management page.

use std::fmt::Write;

use funsport_core::labels::{self, notice};
use funsport_core::listing::contains_ignore_case;
use funsport_core::{NOT_AVAILABLE, User, UserId, UserStats, UserStatus};
use tracing::{info, instrument};

use super::Selection;
use crate::api::{AdminApiError, AdminClient, Violation};
use crate::error::{AppError, Result};
use crate::export;

/// Lock reason sent when an administrator locks an account by hand.
pub const MANUAL_LOCK_REASON: &str = "Manually locked by admin";

/// Customer table state.
#[derive(Debug, Clone, Default)]
pub struct UsersView {
    users: Vec<User>,
    shown: Vec<User>,
    status_filter: Option<String>,
    stats: UserStats,
    selection: Selection,
}

impl UsersView {
    /// Load accounts and their breakdown. Either failure fails the page.
    ///
    /// The violation total is recounted from the accounts.
    ///
    /// # Errors
    ///
    /// Returns an error if either request fails.
    #[instrument(skip(client))]
    pub async fn load(client: &AdminClient) -> std::result::Result<Self, AdminApiError> {
        let (users, stats) = tokio::try_join!(client.list_users(), client.user_stats())?;
        Ok(Self::new(users, stats))
    }

    #[must_use]
    pub fn new(users: Vec<User>, stats: UserStats) -> Self {
        let mut view = Self {
            stats: UserStats {
                total_violations: UserStats::violations_of(&users),
                ..stats
            },
            users,
            ..Self::default()
        };
        view.refresh();
        view
    }

    #[must_use]
    pub fn users(&self) -> &[User] {
        &self.users
    }

    /// Accounts left after the status filter.
    #[must_use]
    pub fn shown(&self) -> &[User] {
        &self.shown
    }

    #[must_use]
    pub const fn stats(&self) -> &UserStats {
        &self.stats
    }

    /// Show accounts whose status contains `status`, ignoring case.
    ///
    /// When nothing matches every account stays listed and the returned
    /// notice says so.
    pub fn filter_by_status(&mut self, status: &str) -> String {
        let matching = self
            .users
            .iter()
            .filter(|u| contains_ignore_case(u.status.as_str(), status))
            .count();
        if matching == 0 {
            self.status_filter = None;
            self.refresh();
            return notice::NO_USER_WITH_STATUS.to_string();
        }

        self.status_filter = Some(status.to_string());
        self.refresh();
        let label = UserStatus::from(status.trim().to_lowercase());
        notice::users_with_status(matching, labels::user_status(&label))
    }

    /// Show every account again.
    pub fn clear_status_filter(&mut self) {
        self.status_filter = None;
        self.refresh();
    }

    // =========================================================================
    // Selection
    // =========================================================================

    #[must_use]
    pub const fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn toggle_selected(&mut self, id: &str) -> bool {
        self.selection.toggle(id)
    }

    /// Check or clear every listed account.
    pub fn select_all(&mut self, selected: bool) {
        self.selection
            .set_all(self.shown.iter().map(|u| u.id.as_str()), selected);
    }

    // =========================================================================
    // Mutations
    // =========================================================================

    /// Lock an active account, or unlock any other.
    ///
    /// # Errors
    ///
    /// Returns an error for an unknown id, or the API error.
    #[instrument(skip(self, client), fields(user_id = %id))]
    pub async fn toggle_lock(&mut self, client: &AdminClient, id: &str) -> Result<String> {
        let index = self.position(id)?;
        let locking = self
            .users
            .get(index)
            .is_some_and(|u| u.status == UserStatus::Active);
        let reason = locking.then_some(MANUAL_LOCK_REASON);

        let updated = client.toggle_user_lock(id, reason).await?;
        let message = notice::account_lock(&updated.name, updated.is_locked());
        info!(locked = updated.is_locked(), "Account lock toggled");
        self.replace(index, updated);
        Ok(message)
    }

    /// Record a violation against account `id`.
    ///
    /// # Errors
    ///
    /// Returns an error for an unknown id, or the API error.
    #[instrument(skip(self, client), fields(user_id = %id, violation = %violation))]
    pub async fn report_violation(
        &mut self,
        client: &AdminClient,
        id: &str,
        violation: Violation,
    ) -> Result<String> {
        let index = self.position(id)?;
        let updated = client.report_violation(id, violation).await?;
        self.replace(index, updated);
        Ok(notice::VIOLATION_REPORTED.to_string())
    }

    /// Lock or unlock one product listed by account `id`.
    ///
    /// # Errors
    ///
    /// Returns an error for an unknown id, or the API error.
    #[instrument(skip(self, client), fields(user_id = %id, product_id = %product_id))]
    pub async fn toggle_product_lock(
        &mut self,
        client: &AdminClient,
        id: &str,
        product_id: &str,
    ) -> Result<String> {
        let index = self.position(id)?;
        let updated = client.toggle_product_lock(id, product_id).await?;
        self.replace(index, updated);
        Ok(notice::PRODUCT_LOCK_TOGGLED.to_string())
    }

    /// Delete account `id`.
    ///
    /// # Errors
    ///
    /// Returns an error for an unknown id, or the API error.
    #[instrument(skip(self, client), fields(user_id = %id))]
    pub async fn delete(&mut self, client: &AdminClient, id: &str) -> Result<String> {
        let index = self.position(id)?;
        client.delete_user(id).await?;
        let removed = self.users.remove(index);
        self.selection.set(id, false);
        self.after_change();
        Ok(notice::user_deleted(&removed.name))
    }

    /// Delete every checked account in one request.
    ///
    /// # Errors
    ///
    /// Returns a validation error when nothing is checked, or the API error.
    #[instrument(skip(self, client))]
    pub async fn delete_selected(&mut self, client: &AdminClient) -> Result<String> {
        let ids: Vec<UserId> = self
            .users
            .iter()
            .filter(|u| self.selection.is_selected(u.id.as_str()))
            .map(|u| u.id.clone())
            .collect();
        if ids.is_empty() {
            return Err(AppError::validation(notice::SELECT_USERS));
        }

        client.delete_users(&ids).await?;
        info!(count = ids.len(), "Accounts deleted");
        self.users.retain(|u| !ids.contains(&u.id));
        self.selection.clear();
        self.after_change();
        Ok(notice::USER_DELETED.to_string())
    }

    // =========================================================================
    // Output
    // =========================================================================

    /// CSV of every account, ignoring the status filter.
    #[must_use]
    pub fn export_csv(&self) -> String {
        export::users_csv(&self.users)
    }

    /// Multi-line summary of account `id`.
    ///
    /// # Errors
    ///
    /// Returns an error for an unknown id.
    pub fn details(&self, id: &str) -> Result<String> {
        let user = self
            .users
            .get(self.position(id)?)
            .ok_or_else(|| AppError::not_found(notice::USER_NOT_FOUND))?;

        let mut text = String::new();
        let _ = writeln!(text, "Tên: {}", user.name);
        let _ = writeln!(text, "Email: {}", user.email);
        let _ = writeln!(
            text,
            "Số điện thoại: {}",
            user.phone.as_deref().unwrap_or(NOT_AVAILABLE)
        );
        let _ = writeln!(
            text,
            "Địa chỉ: {}",
            user.address.as_deref().unwrap_or(NOT_AVAILABLE)
        );
        let _ = writeln!(text, "Trạng thái: {}", labels::user_status(&user.status));
        let _ = write!(text, "Vi phạm: {}", labels::violation_summary(user));
        Ok(text)
    }

    fn position(&self, id: &str) -> Result<usize> {
        self.users
            .iter()
            .position(|u| u.id == id)
            .ok_or_else(|| AppError::not_found(notice::USER_NOT_FOUND))
    }

    fn replace(&mut self, index: usize, user: User) {
        if let Some(slot) = self.users.get_mut(index) {
            *slot = user;
        }
        self.after_change();
    }

    fn after_change(&mut self) {
        self.stats = UserStats::from_users(&self.users);
        self.refresh();
    }

    fn refresh(&mut self) {
        self.shown = match self.status_filter.as_deref() {
            None => self.users.clone(),
            Some(status) => self
                .users
                .iter()
                .filter(|u| contains_ignore_case(u.status.as_str(), status))
                .cloned()
                .collect(),
        };
    }
}
