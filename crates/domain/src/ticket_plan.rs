// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Ticket plan normalization and validation.
//!
//! A plan is either a single free-seating tier or a set of named tiers
//! that can each be included or excluded. Raw admin input arrives as text
//! and is parsed at the boundary: text that is not a number never reaches
//! the plan.
//!
//! ## Invariants
//!
//! - Tier names are unique within a plan
//! - `total_tickets` is derived from the included tiers on every call
//! - Prices of free events are always zero once normalized

use crate::error::DomainError;
use crate::types::EventType;
use serde::{Deserialize, Serialize};

/// Name of the implicit tier of a free-seating plan.
pub const FREE_SEATING_TIER: &str = "Free Seating";

/// Largest price accepted, in cents. Prices are stored as signed 64-bit
/// integers.
pub const MAX_PRICE_CENTS: u64 = i64::MAX.unsigned_abs();

const NUMBER_FIELD: &str = "number of tickets";
const PRICE_FIELD: &str = "price";
const MAX_PER_PERSON_FIELD: &str = "max per person";

/// How tickets are organized for an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SeatingMode {
    /// A single tier with no assigned seating.
    FreeSeating,
    /// Named tiers, each with its own quantity, price and limit.
    Tiered,
}

/// A normalized, validated ticket tier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TicketTier {
    pub name: String,
    pub total_quantity: u32,
    /// Price in cents.
    pub price_cents: u64,
    pub max_per_person: u32,
}

/// Raw text input for one tier, as typed by an admin.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TierInput<'a> {
    pub number: &'a str,
    pub price: &'a str,
    pub max_per_person: &'a str,
    pub included: bool,
}

impl<'a> TierInput<'a> {
    #[must_use]
    pub const fn new(number: &'a str, price: &'a str, max_per_person: &'a str) -> Self {
        Self {
            number,
            price,
            max_per_person,
            included: true,
        }
    }
}

/// A tier as held in an in-progress plan. Numeric fields may be unset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TierDraft {
    name: String,
    number: Option<u32>,
    price_cents: Option<u64>,
    max_per_person: Option<u32>,
    included: bool,
}

impl TierDraft {
    fn parse(name: &str, input: &TierInput<'_>) -> Result<Self, DomainError> {
        Ok(Self {
            name: name.to_string(),
            number: parse_quantity(NUMBER_FIELD, input.number)?,
            price_cents: parse_price(PRICE_FIELD, input.price)?,
            max_per_person: parse_max_per_person(name, input.max_per_person)?,
            included: input.included,
        })
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub const fn number(&self) -> Option<u32> {
        self.number
    }

    #[must_use]
    pub const fn price_cents(&self) -> Option<u64> {
        self.price_cents
    }

    #[must_use]
    pub const fn max_per_person(&self) -> Option<u32> {
        self.max_per_person
    }

    #[must_use]
    pub const fn is_included(&self) -> bool {
        self.included
    }
}

/// An in-progress set of ticket tiers for one event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TicketPlan {
    event_type: EventType,
    mode: SeatingMode,
    tiers: Vec<TierDraft>,
}

impl TicketPlan {
    /// Creates a free-seating plan from raw input.
    ///
    /// # Errors
    ///
    /// Returns an error if any field is not a valid number.
    pub fn free_seating(
        event_type: EventType,
        number: &str,
        price: &str,
        max_per_person: &str,
    ) -> Result<Self, DomainError> {
        let tier = TierDraft::parse(
            FREE_SEATING_TIER,
            &TierInput::new(number, price, max_per_person),
        )?;
        Ok(Self {
            event_type,
            mode: SeatingMode::FreeSeating,
            tiers: vec![tier],
        })
    }

    /// Creates an empty tiered plan.
    #[must_use]
    pub const fn tiered(event_type: EventType) -> Self {
        Self {
            event_type,
            mode: SeatingMode::Tiered,
            tiers: Vec::new(),
        }
    }

    /// Rebuilds a plan from stored tiers.
    ///
    /// A single tier named [`FREE_SEATING_TIER`] is read back as a
    /// free-seating plan.
    #[must_use]
    pub fn from_tiers(event_type: EventType, tiers: &[TicketTier]) -> Self {
        let mode = match tiers {
            [only] if only.name == FREE_SEATING_TIER => SeatingMode::FreeSeating,
            _ => SeatingMode::Tiered,
        };
        let tiers = tiers
            .iter()
            .map(|tier| TierDraft {
                name: tier.name.clone(),
                number: Some(tier.total_quantity),
                price_cents: Some(tier.price_cents),
                max_per_person: Some(tier.max_per_person),
                included: true,
            })
            .collect();
        Self {
            event_type,
            mode,
            tiers,
        }
    }

    #[must_use]
    pub const fn event_type(&self) -> EventType {
        self.event_type
    }

    #[must_use]
    pub const fn mode(&self) -> SeatingMode {
        self.mode
    }

    #[must_use]
    pub fn tiers(&self) -> &[TierDraft] {
        &self.tiers
    }

    /// Changes the event type the plan is priced for.
    pub const fn set_event_type(&mut self, event_type: EventType) {
        self.event_type = event_type;
    }

    /// Adds a named tier to a tiered plan.
    ///
    /// # Errors
    ///
    /// Returns an error if the plan is free seating, the name is empty,
    /// reserved or already used, or any numeric field fails to parse.
    pub fn add_tier(&mut self, name: &str, input: &TierInput<'_>) -> Result<(), DomainError> {
        self.require_tiered("add tier")?;
        let name = validate_tier_name(name)?;
        if self.position(name).is_some() {
            return Err(DomainError::TierNameCollision {
                name: name.to_string(),
            });
        }
        self.tiers.push(TierDraft::parse(name, input)?);
        Ok(())
    }

    /// Removes a tier, returning it.
    ///
    /// # Errors
    ///
    /// Returns an error if the plan is free seating or the tier does not exist.
    pub fn remove_tier(&mut self, name: &str) -> Result<TierDraft, DomainError> {
        self.require_tiered("remove tier")?;
        let index = self.index_of(name)?;
        Ok(self.tiers.remove(index))
    }

    /// Renames a tier, keeping every other field.
    ///
    /// The tier is removed and re-inserted under the new name.
    ///
    /// # Errors
    ///
    /// Returns an error if the new name is empty, reserved or collides with
    /// another tier.
    pub fn rename_tier(&mut self, from: &str, to: &str) -> Result<(), DomainError> {
        self.require_tiered("rename tier")?;
        let to = validate_tier_name(to)?;
        let index = self.index_of(from)?;
        if from == to {
            return Ok(());
        }
        if self.position(to).is_some() {
            return Err(DomainError::TierNameCollision {
                name: to.to_string(),
            });
        }
        let mut tier = self.tiers.remove(index);
        tier.name = to.to_string();
        self.tiers.push(tier);
        Ok(())
    }

    /// Sets the number of tickets of a tier from raw input.
    ///
    /// # Errors
    ///
    /// Returns an error if the tier does not exist or the input is not a
    /// non-negative whole number.
    pub fn set_quantity(&mut self, name: &str, input: &str) -> Result<(), DomainError> {
        let number = parse_quantity(NUMBER_FIELD, input)?;
        let index = self.index_of(name)?;
        self.tiers[index].number = number;
        Ok(())
    }

    /// Sets the price of a tier from raw decimal input.
    ///
    /// # Errors
    ///
    /// Returns an error if the tier does not exist or the input is not a
    /// valid non-negative price.
    pub fn set_price(&mut self, name: &str, input: &str) -> Result<(), DomainError> {
        let price = parse_price(PRICE_FIELD, input)?;
        let index = self.index_of(name)?;
        self.tiers[index].price_cents = price;
        Ok(())
    }

    /// Sets the per-person limit of a tier from raw input.
    ///
    /// # Errors
    ///
    /// Returns an error if the tier does not exist or the input is not a
    /// whole number of at least 1.
    pub fn set_max_per_person(&mut self, name: &str, input: &str) -> Result<(), DomainError> {
        let max = parse_max_per_person(name, input)?;
        let index = self.index_of(name)?;
        self.tiers[index].max_per_person = max;
        Ok(())
    }

    /// Includes or excludes a tier.
    ///
    /// # Errors
    ///
    /// Returns an error if the plan is free seating or the tier does not exist.
    pub fn set_included(&mut self, name: &str, included: bool) -> Result<(), DomainError> {
        self.require_tiered("toggle tier")?;
        let index = self.index_of(name)?;
        self.tiers[index].included = included;
        Ok(())
    }

    /// Sum of ticket numbers over the included tiers.
    #[must_use]
    pub fn total_tickets(&self) -> u64 {
        self.included()
            .filter_map(|tier| tier.number)
            .map(u64::from)
            .sum()
    }

    /// Collects every violation in the plan.
    #[must_use]
    pub fn validate(&self) -> Vec<DomainError> {
        let mut errors = Vec::new();

        if self.included().next().is_none() {
            errors.push(DomainError::NoTiersIncluded);
        }

        let price_required = self.event_type != EventType::Free;
        for tier in self.included() {
            if tier.number.is_none() {
                errors.push(DomainError::IncompleteTier {
                    tier: tier.name.clone(),
                    field: NUMBER_FIELD,
                });
            }
            if price_required && tier.price_cents.is_none() {
                errors.push(DomainError::IncompleteTier {
                    tier: tier.name.clone(),
                    field: PRICE_FIELD,
                });
            }
            if tier.max_per_person.is_none() {
                errors.push(DomainError::IncompleteTier {
                    tier: tier.name.clone(),
                    field: MAX_PER_PERSON_FIELD,
                });
            }
        }

        errors
    }

    /// Produces the normalized tier set.
    ///
    /// Excluded tiers are dropped and free events are priced at zero.
    ///
    /// # Errors
    ///
    /// Returns every violation found by [`TicketPlan::validate`].
    pub fn normalize(&self) -> Result<Vec<TicketTier>, Vec<DomainError>> {
        let errors = self.validate();
        if !errors.is_empty() {
            return Err(errors);
        }

        Ok(self.complete_tiers())
    }

    /// Included tiers whose numeric fields are all set, priced for the
    /// event type. Incomplete tiers are skipped rather than reported.
    #[must_use]
    pub fn complete_tiers(&self) -> Vec<TicketTier> {
        let is_free = self.event_type == EventType::Free;
        self.included()
            .filter_map(|tier| {
                Some(TicketTier {
                    name: tier.name.clone(),
                    total_quantity: tier.number?,
                    price_cents: if is_free { 0 } else { tier.price_cents? },
                    max_per_person: tier.max_per_person?,
                })
            })
            .collect()
    }

    fn included(&self) -> impl Iterator<Item = &TierDraft> {
        // The free-seating tier has no include toggle.
        let free_seating = self.mode == SeatingMode::FreeSeating;
        self.tiers
            .iter()
            .filter(move |tier| free_seating || tier.included)
    }

    fn position(&self, name: &str) -> Option<usize> {
        self.tiers.iter().position(|tier| tier.name == name)
    }

    fn index_of(&self, name: &str) -> Result<usize, DomainError> {
        self.position(name).ok_or_else(|| DomainError::TierNotFound {
            name: name.to_string(),
        })
    }

    const fn require_tiered(&self, operation: &'static str) -> Result<(), DomainError> {
        match self.mode {
            SeatingMode::Tiered => Ok(()),
            SeatingMode::FreeSeating => Err(DomainError::SeatingModeMismatch { operation }),
        }
    }
}

fn validate_tier_name(name: &str) -> Result<&str, DomainError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(DomainError::InvalidTierName(String::from(
            "Tier name cannot be empty",
        )));
    }
    // Reserved so a stored single tier reads back as free seating.
    if trimmed.eq_ignore_ascii_case(FREE_SEATING_TIER) {
        return Err(DomainError::InvalidTierName(format!(
            "\"{FREE_SEATING_TIER}\" is reserved for free-seating plans"
        )));
    }
    Ok(trimmed)
}

/// Parses a ticket quantity. Empty input leaves the field unset.
///
/// # Errors
///
/// Returns `NonNumericInput` for text that is not a whole number and
/// `NegativeValue` for numbers below zero.
pub fn parse_quantity(field: &str, input: &str) -> Result<Option<u32>, DomainError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    let value: i64 = trimmed.parse().map_err(|_| DomainError::NonNumericInput {
        field: field.to_string(),
        value: input.to_string(),
    })?;
    if value < 0 {
        return Err(DomainError::NegativeValue {
            field: field.to_string(),
            value: input.to_string(),
        });
    }
    u32::try_from(value)
        .map(Some)
        .map_err(|_| DomainError::NonNumericInput {
            field: field.to_string(),
            value: input.to_string(),
        })
}

/// Parses a decimal price into cents. Empty input leaves the field unset.
///
/// # Errors
///
/// Returns `NonNumericInput` for non-numeric text, `NegativeValue` for
/// negative amounts and `InvalidPrice` for more than two decimal places
/// or an amount above [`MAX_PRICE_CENTS`].
pub fn parse_price(field: &str, input: &str) -> Result<Option<u64>, DomainError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }

    let non_numeric = || DomainError::NonNumericInput {
        field: field.to_string(),
        value: input.to_string(),
    };

    let (negative, unsigned) = trimmed
        .strip_prefix('-')
        .map_or((false, trimmed), |rest| (true, rest));
    let (whole, fraction) = unsigned.split_once('.').unwrap_or((unsigned, ""));

    let is_digits = |s: &str| s.chars().all(|c| c.is_ascii_digit());
    if (whole.is_empty() && fraction.is_empty()) || !is_digits(whole) || !is_digits(fraction) {
        return Err(non_numeric());
    }
    if negative {
        return Err(DomainError::NegativeValue {
            field: field.to_string(),
            value: input.to_string(),
        });
    }
    if fraction.len() > 2 {
        return Err(DomainError::InvalidPrice {
            value: input.to_string(),
        });
    }

    let overflow = || DomainError::InvalidPrice {
        value: input.to_string(),
    };
    let whole: u64 = if whole.is_empty() {
        0
    } else {
        whole.parse().map_err(|_| overflow())?
    };
    let cents: u64 = format!("{fraction:0<2}").parse().map_err(|_| overflow())?;

    whole
        .checked_mul(100)
        .and_then(|w| w.checked_add(cents))
        .filter(|total| *total <= MAX_PRICE_CENTS)
        .map(Some)
        .ok_or_else(overflow)
}

/// Parses a per-person limit. Empty input leaves the field unset.
///
/// # Errors
///
/// Returns `InvalidMaxPerPerson` for fractional, zero or negative numbers
/// and `NonNumericInput` for text that is not a number at all.
pub fn parse_max_per_person(tier: &str, input: &str) -> Result<Option<u32>, DomainError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    let invalid = || DomainError::InvalidMaxPerPerson {
        tier: tier.to_string(),
        value: input.to_string(),
    };
    match trimmed.parse::<i64>() {
        Ok(value) if value >= 1 => u32::try_from(value).map(Some).map_err(|_| invalid()),
        Ok(_) => Err(invalid()),
        Err(_) if trimmed.parse::<f64>().is_ok() => Err(invalid()),
        Err(_) => Err(DomainError::NonNumericInput {
            field: MAX_PER_PERSON_FIELD.to_string(),
            value: input.to_string(),
        }),
    }
}
