//! Two-step self-service registration: account details, then service details.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::catalog::PriceCatalogs;
use crate::model::{BuildingTypeKey, EstimatedPrice, PickupFrequencyKey, WasteVolumeKey};
use crate::selection::RegistrationServiceSelection;

/// Areas the collection service currently covers.
pub const SERVICE_AREAS: [&str; 16] = [
    "Victoria Island",
    "Ikoyi",
    "Lekki",
    "Ajah",
    "Surulere",
    "Ikeja",
    "Yaba",
    "Gbagada",
    "Magodo",
    "Ojodu",
    "Berger",
    "Ketu",
    "Mile 12",
    "Ikorodu",
    "Epe",
    "Badagry",
];

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
/// Reasons a registration step cannot be submitted.
pub enum RegistrationError {
    /// A required field is blank.
    #[error("{0} is required")]
    MissingField(&'static str),
    /// Email was given but does not look like an address.
    #[error("Invalid email address: {0}")]
    InvalidEmail(String),
    /// Area is not one of the covered service areas.
    #[error("We do not serve {0} yet")]
    UnsupportedArea(String),
    /// Password and confirmation differ.
    #[error("Passwords do not match")]
    PasswordMismatch,
    /// Service details are not complete enough to price.
    #[error("Choose a building type, waste volume and pickup frequency first")]
    IncompleteService,
    /// The submitted step is not the one the flow is on.
    #[error("Cannot submit {submitted:?} while on {current:?}")]
    WrongStep {
        /// Step the flow is on.
        current: RegistrationStep,
        /// Step that was submitted.
        submitted: RegistrationStep,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
/// Where the customer is in the registration flow.
pub enum RegistrationStep {
    /// Basic account creation.
    Account,
    /// Residence and service details.
    Service,
    /// Registration finished.
    Completed,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
/// Fields of the account step.
pub struct AccountDetails {
    /// Full name.
    pub full_name: String,
    /// Phone number.
    pub phone: String,
    /// Optional email address.
    pub email: Option<String>,
    /// Service area, one of [`SERVICE_AREAS`].
    pub area: String,
    /// Street address.
    pub street: String,
    /// Chosen password.
    pub password: String,
    /// Password typed a second time.
    pub confirm_password: String,
}

impl AccountDetails {
    /// Check the account step the way the form does before moving on.
    ///
    /// # Errors
    ///
    /// Returns the first [`RegistrationError`] found, checking required fields in form order.
    pub fn validate(&self) -> Result<(), RegistrationError> {
        let required = [
            ("Full name", &self.full_name),
            ("Phone number", &self.phone),
            ("Area", &self.area),
            ("Street address", &self.street),
            ("Password", &self.password),
        ];
        if let Some(&(field, _)) = required.iter().find(|(_, value)| value.trim().is_empty()) {
            return Err(RegistrationError::MissingField(field));
        }

        if let Some(email) = self.email.as_deref().map(str::trim)
            && !email.is_empty()
            && !is_plausible_email(email)
        {
            return Err(RegistrationError::InvalidEmail(email.to_owned()));
        }

        let area = self.area.trim();
        if !SERVICE_AREAS.iter().any(|known| *known == area) {
            return Err(RegistrationError::UnsupportedArea(self.area.clone()));
        }

        if self.password != self.confirm_password {
            return Err(RegistrationError::PasswordMismatch);
        }
        Ok(())
    }
}

/// Non-empty local part, and a domain with a dot between two non-empty labels.
fn is_plausible_email(email: &str) -> bool {
    email.split_once('@').is_some_and(|(local, domain)| {
        !local.is_empty()
            && domain
                .rsplit_once('.')
                .is_some_and(|(host, tld)| !host.is_empty() && !tld.is_empty())
    })
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
/// What a finished registration hands on to the backend.
pub struct RegistrationSummary {
    /// Full name.
    pub full_name: String,
    /// Phone number.
    pub phone: String,
    /// Optional email address.
    pub email: Option<String>,
    /// Service area.
    pub area: String,
    /// Street address.
    pub street: String,
    /// Building type.
    pub building_type: BuildingTypeKey,
    /// Occupant count.
    pub occupants: u32,
    /// Waste volume.
    pub waste_volume: WasteVolumeKey,
    /// Pickup frequency.
    pub pickup_frequency: PickupFrequencyKey,
    /// Monthly fee quoted at submission.
    pub monthly_fee: EstimatedPrice,
}

/// State of one customer's pass through the registration form.
#[derive(Debug, Clone)]
pub struct RegistrationFlow {
    step: RegistrationStep,
    account: AccountDetails,
    selection: RegistrationServiceSelection,
}

impl Default for RegistrationFlow {
    fn default() -> Self {
        Self::new()
    }
}

impl RegistrationFlow {
    /// Start on the account step with empty fields.
    #[must_use]
    pub fn new() -> Self {
        Self {
            step: RegistrationStep::Account,
            account: AccountDetails::default(),
            selection: RegistrationServiceSelection::new(),
        }
    }

    /// Current step.
    #[must_use]
    pub fn step(&self) -> RegistrationStep {
        self.step
    }

    /// Account details entered so far.
    #[must_use]
    pub fn account(&self) -> &AccountDetails {
        &self.account
    }

    /// Service selection entered so far.
    #[must_use]
    pub fn selection(&self) -> &RegistrationServiceSelection {
        &self.selection
    }

    /// Mutable access to the service selection.
    ///
    /// Edits are allowed on any step; only [`RegistrationFlow::submit_service`]
    /// checks the step, and a completed flow's summary is not changed by them.
    pub fn selection_mut(&mut self) -> &mut RegistrationServiceSelection {
        &mut self.selection
    }

    /// Price currently shown next to the service form.
    #[must_use]
    pub fn current_estimate(&self, catalogs: &PriceCatalogs) -> Option<EstimatedPrice> {
        self.selection.estimate(catalogs)
    }

    /// Submit the account step and move on to service details.
    ///
    /// # Errors
    ///
    /// Returns [`RegistrationError::WrongStep`] outside the account step, or the
    /// validation error of [`AccountDetails::validate`]. On error the flow stays put.
    pub fn submit_account(&mut self, account: AccountDetails) -> Result<(), RegistrationError> {
        self.expect_step(RegistrationStep::Account)?;
        account.validate()?;
        self.account = account;
        self.step = RegistrationStep::Service;
        debug!(area = %self.account.area, "account step accepted");
        Ok(())
    }

    /// Go back from service details to the account step, keeping what was typed.
    pub fn back(&mut self) {
        if self.step == RegistrationStep::Service {
            self.step = RegistrationStep::Account;
        }
    }

    /// Submit the service step and finish registration.
    ///
    /// # Errors
    ///
    /// Returns [`RegistrationError::WrongStep`] outside the service step and
    /// [`RegistrationError::IncompleteService`] when no estimate can be made.
    pub fn submit_service(
        &mut self,
        catalogs: &PriceCatalogs,
    ) -> Result<RegistrationSummary, RegistrationError> {
        self.expect_step(RegistrationStep::Service)?;

        let (Some(building_type), Some(waste_volume), Some(pickup_frequency)) = (
            self.selection.building_type(),
            self.selection.waste_volume(),
            self.selection.pickup_frequency(),
        ) else {
            return Err(RegistrationError::IncompleteService);
        };
        let monthly_fee = self
            .selection
            .estimate(catalogs)
            .ok_or(RegistrationError::IncompleteService)?;

        self.step = RegistrationStep::Completed;
        debug!(%monthly_fee, "registration completed");

        Ok(RegistrationSummary {
            full_name: self.account.full_name.trim().to_owned(),
            phone: self.account.phone.trim().to_owned(),
            email: self
                .account
                .email
                .as_deref()
                .map(str::trim)
                .filter(|email| !email.is_empty())
                .map(str::to_owned),
            area: self.account.area.trim().to_owned(),
            street: self.account.street.trim().to_owned(),
            building_type,
            occupants: self.selection.occupants(),
            waste_volume,
            pickup_frequency,
            monthly_fee,
        })
    }

    fn expect_step(&self, submitted: RegistrationStep) -> Result<(), RegistrationError> {
        if self.step == submitted {
            Ok(())
        } else {
            Err(RegistrationError::WrongStep {
                current: self.step,
                submitted,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{BuildingType, PickupFrequency, WasteVolume};

    fn account() -> AccountDetails {
        AccountDetails {
            full_name: "Ada Obi".to_owned(),
            phone: "+234 801 234 5678".to_owned(),
            email: None,
            area: "Lekki".to_owned(),
            street: "12 Admiralty Way".to_owned(),
            password: "s3cret".to_owned(),
            confirm_password: "s3cret".to_owned(),
        }
    }

    #[test]
    fn valid_account_passes() {
        assert_eq!(account().validate(), Ok(()));
    }

    #[test]
    fn reports_first_missing_field() {
        let mut details = account();
        details.phone = "  ".to_owned();
        details.street = String::new();
        assert_eq!(
            details.validate(),
            Err(RegistrationError::MissingField("Phone number"))
        );
    }

    #[test]
    fn rejects_password_mismatch() {
        let mut details = account();
        details.confirm_password = "other".to_owned();
        assert_eq!(details.validate(), Err(RegistrationError::PasswordMismatch));
    }

    #[test]
    fn rejects_unknown_area() {
        let mut details = account();
        details.area = "Abuja".to_owned();
        assert_eq!(
            details.validate(),
            Err(RegistrationError::UnsupportedArea("Abuja".to_owned()))
        );
    }

    #[test]
    fn blank_email_is_optional_but_bad_email_is_not() {
        let mut details = account();
        details.email = Some(" ".to_owned());
        assert_eq!(details.validate(), Ok(()));
        details.email = Some("ada.example.com".to_owned());
        assert!(matches!(
            details.validate(),
            Err(RegistrationError::InvalidEmail(_))
        ));
    }

    #[test]
    fn email_domain_needs_labels_around_the_dot() {
        for bad in ["a@.", "a@b.", "a@.com", "@b.com", "a@bcom"] {
            assert!(!is_plausible_email(bad), "{bad}");
        }
        for good in ["a@b.c", "ada@mail.example.ng"] {
            assert!(is_plausible_email(good), "{good}");
        }
    }

    #[test]
    fn failed_account_submit_keeps_step() {
        let mut flow = RegistrationFlow::new();
        let mut details = account();
        details.confirm_password = "nope".to_owned();
        assert!(flow.submit_account(details).is_err());
        assert_eq!(flow.step(), RegistrationStep::Account);
    }

    #[test]
    fn selection_edits_do_not_reopen_a_completed_flow() {
        let catalogs = PriceCatalogs::new(
            vec![BuildingType {
                key: BuildingTypeKey::Flat,
                label: "Flat/Apartment".to_owned(),
                base_price: 8000,
            }],
            vec![WasteVolume {
                key: WasteVolumeKey::Low,
                label: "Low".to_owned(),
                multiplier: 1.0,
            }],
            vec![PickupFrequency {
                key: PickupFrequencyKey::OncePerWeek,
                label: "1x per week".to_owned(),
                multiplier: 1.0,
            }],
        )
        .unwrap();
        let mut flow = RegistrationFlow::new();
        flow.selection_mut().set_building_type("flat");
        flow.submit_account(account()).unwrap();
        flow.selection_mut().set_waste_volume("low");
        flow.selection_mut().set_pickup_frequency("1x");
        let summary = flow.submit_service(&catalogs).unwrap();

        flow.selection_mut().set_occupants(40);
        assert_eq!(flow.selection().occupants(), 40);
        assert_eq!(summary.monthly_fee, EstimatedPrice(8000));
        assert_eq!(
            flow.submit_service(&catalogs),
            Err(RegistrationError::WrongStep {
                current: RegistrationStep::Completed,
                submitted: RegistrationStep::Service,
            })
        );
    }

    #[test]
    fn back_keeps_entered_account() {
        let mut flow = RegistrationFlow::new();
        flow.submit_account(account()).unwrap();
        assert_eq!(flow.step(), RegistrationStep::Service);
        flow.back();
        assert_eq!(flow.step(), RegistrationStep::Account);
        assert_eq!(flow.account().full_name, "Ada Obi");
    }
}
