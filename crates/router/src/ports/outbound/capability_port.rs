//! Root Capability Port - Navigation entry points of the root screen
//!
//! Whatever screen is currently root implements this trait. The router never
//! builds destination screens itself; it asks the root to open them.

/// Port for in-place navigation performed by the root screen.
///
/// Calls are synchronous and must not re-enter the router.
#[cfg_attr(any(test, feature = "testing"), mockall::automock)]
pub trait RootCapabilityPort: Send + Sync {
    /// Open the detail screen of a match
    fn open_match_detail(&self, match_id: &str);

    /// Open the betslip pre-filled from a shared ticket
    fn open_betslip_with_share_data(&self, ticket_token: &str);

    fn open_competition_detail(&self, competition_id: &str);

    fn open_contact_settings(&self);

    fn open_betswipe(&self);

    fn open_deposit(&self);

    fn open_bonus(&self);

    fn open_documents(&self);

    fn open_customer_support(&self);

    fn open_favorites(&self);

    fn open_promotions(&self);

    /// Open registration with a referral code filled in
    fn open_register_with_code(&self, code: &str);

    fn open_responsible_form(&self);
}
