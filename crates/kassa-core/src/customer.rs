//! # Customer Module
//!
//! Customers and their optional memberships.
//!
//! Name and personal identity number are mandatory and form the customer's
//! identity; phone, email, and address are optional. The membership
//! lifecycle (join, leave, age gate) lives here because the customer owns
//! the personal number the age is derived from.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{CoreError, CoreResult, ValidationError};
use crate::membership::Membership;
use crate::validation::{
    validate_address, validate_customer_name, validate_email_address, validate_personal_number,
    validate_phone_number,
};
use crate::ADULT_AGE_YEARS;

// =============================================================================
// Customer Config
// =============================================================================

/// Everything needed to construct a [`Customer`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CustomerConfig {
    pub name: String,
    /// Ten digits; the first six read as a YYMMDD birth date.
    pub personal_number: String,
    pub phone_number: Option<String>,
    pub email_address: Option<String>,
    pub address: Option<String>,
}

// =============================================================================
// Customer
// =============================================================================

/// A customer of the store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Customer {
    name: String,
    personal_number: String,
    phone_number: Option<String>,
    email_address: Option<String>,
    address: Option<String>,
    membership: Option<Membership>,
}

impl Customer {
    /// Validates the config and builds the customer.
    ///
    /// ## Example
    /// ```rust
    /// use kassa_core::customer::CustomerConfig;
    /// use kassa_core::Customer;
    ///
    /// let customer = Customer::new(CustomerConfig {
    ///     name: "Anna Svensson".to_string(),
    ///     personal_number: "9001011234".to_string(),
    ///     phone_number: Some("0701234567".to_string()),
    ///     email_address: None,
    ///     address: None,
    /// })
    /// .unwrap();
    /// assert!(!customer.is_member());
    /// ```
    pub fn new(config: CustomerConfig) -> CoreResult<Self> {
        validate_customer_name(&config.name)?;
        validate_personal_number(&config.personal_number)?;
        if let Some(phone) = &config.phone_number {
            validate_phone_number(phone)?;
        }
        if let Some(email) = &config.email_address {
            validate_email_address(email)?;
        }
        if let Some(address) = &config.address {
            validate_address(address)?;
        }

        Ok(Customer {
            name: config.name,
            personal_number: config.personal_number,
            phone_number: config.phone_number,
            email_address: config.email_address,
            address: config.address,
            membership: None,
        })
    }

    // -------------------------------------------------------------------------
    // Identity and Contact Fields
    // -------------------------------------------------------------------------

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn personal_number(&self) -> &str {
        &self.personal_number
    }

    pub fn phone_number(&self) -> Option<&str> {
        self.phone_number.as_deref()
    }

    pub fn email_address(&self) -> Option<&str> {
        self.email_address.as_deref()
    }

    pub fn address(&self) -> Option<&str> {
        self.address.as_deref()
    }

    /// Replaces the phone number after validating it.
    pub fn set_phone_number(&mut self, phone: String) -> CoreResult<()> {
        validate_phone_number(&phone)?;
        self.phone_number = Some(phone);
        Ok(())
    }

    /// Replaces the email address after validating it.
    pub fn set_email_address(&mut self, email: String) -> CoreResult<()> {
        validate_email_address(&email)?;
        self.email_address = Some(email);
        Ok(())
    }

    /// Replaces the street address after validating it.
    pub fn set_address(&mut self, address: String) -> CoreResult<()> {
        validate_address(&address)?;
        self.address = Some(address);
        Ok(())
    }

    // -------------------------------------------------------------------------
    // Membership Lifecycle
    // -------------------------------------------------------------------------

    #[inline]
    pub fn is_member(&self) -> bool {
        self.membership.is_some()
    }

    pub fn membership(&self) -> Option<&Membership> {
        self.membership.as_ref()
    }

    pub fn membership_mut(&mut self) -> Option<&mut Membership> {
        self.membership.as_mut()
    }

    /// Joins the store's membership program, starting today.
    ///
    /// ## Errors
    /// - [`CoreError::AlreadyMember`] if a membership exists
    /// - [`CoreError::UnderAge`] if the birth date derived from the
    ///   personal number is less than 18 years before `today`
    /// - a validation error if the first six digits do not read as a date
    pub fn join_membership(
        &mut self,
        initial_points: i64,
        is_employee: bool,
        today: NaiveDate,
    ) -> CoreResult<()> {
        if self.is_member() {
            return Err(CoreError::AlreadyMember);
        }

        let birth_date = birth_date_from_personal_number(&self.personal_number, today)?;
        if years_between(birth_date, today) < ADULT_AGE_YEARS {
            return Err(CoreError::UnderAge {
                min_years: ADULT_AGE_YEARS,
            });
        }

        self.membership = Some(Membership::new(today, initial_points, is_employee)?);
        Ok(())
    }

    /// Leaves the membership program.
    ///
    /// ## Errors
    /// [`CoreError::NotAMember`] if there is nothing to leave.
    pub fn leave_membership(&mut self) -> CoreResult<()> {
        if self.membership.take().is_none() {
            return Err(CoreError::NotAMember);
        }
        Ok(())
    }
}

impl fmt::Display for Customer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[Name = {}, PersonalNumber = {}", self.name, self.personal_number)?;
        if let Some(address) = &self.address {
            write!(f, ", Address = {address}")?;
        }
        if let Some(email) = &self.email_address {
            write!(f, ", EmailAddress = {email}")?;
        }
        if let Some(phone) = &self.phone_number {
            write!(f, ", PhoneNumber = {phone}")?;
        }
        write!(f, "]")
    }
}

// =============================================================================
// Birth Date Derivation
// =============================================================================

/// Reads the YYMMDD prefix of a personal number as a birth date.
///
/// The two-digit year is resolved against `today`: 2000 + YY when that
/// date has already happened, otherwise 1900 + YY. Anyone over 100 is
/// folded into the wrong century by this rule; the ten-digit format
/// carries no more information.
fn birth_date_from_personal_number(
    personal_number: &str,
    today: NaiveDate,
) -> CoreResult<NaiveDate> {
    let invalid = || {
        CoreError::from(ValidationError::InvalidFormat {
            field: "personal number",
            reason: "first six digits must read as a YYMMDD date",
        })
    };

    let yy: i32 = personal_number[0..2].parse().map_err(|_| invalid())?;
    let month: u32 = personal_number[2..4].parse().map_err(|_| invalid())?;
    let day: u32 = personal_number[4..6].parse().map_err(|_| invalid())?;

    let this_century = NaiveDate::from_ymd_opt(2000 + yy, month, day).ok_or_else(invalid)?;
    if this_century <= today {
        Ok(this_century)
    } else {
        NaiveDate::from_ymd_opt(1900 + yy, month, day).ok_or_else(invalid)
    }
}

/// Whole years from `from` to `to`, counting birthdays.
fn years_between(from: NaiveDate, to: NaiveDate) -> i32 {
    let mut years = to.year() - from.year();
    if (to.month(), to.day()) < (from.month(), from.day()) {
        years -= 1;
    }
    years
}

// =============================================================================
// Unit Tests
// =============================================================================
