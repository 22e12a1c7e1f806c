use rust_decimal::Decimal;

use crate::core::{AppError, Result};

/// Decimal places carried by every stored amount
pub const AMOUNT_SCALE: u32 = 2;

/// Decimal places accepted for item quantities (loose produce is sold by weight)
pub const QUANTITY_SCALE: u32 = 3;

/// Largest amount a `DECIMAL(15,2)` column holds
pub fn max_amount() -> Decimal {
    Decimal::new(999_999_999_999_999, AMOUNT_SCALE)
}

/// Largest quantity a `DECIMAL(12,3)` column holds
pub fn max_quantity() -> Decimal {
    Decimal::new(999_999_999_999, QUANTITY_SCALE)
}

/// Rounds a value to the stored amount scale
pub fn round_amount(amount: Decimal) -> Decimal {
    amount.round_dp(AMOUNT_SCALE)
}

/// Validates a strictly positive amount with at most two decimal places
///
/// `field` names the amount in the error message.
pub fn validate_positive_amount(field: &str, amount: Decimal) -> Result<()> {
    if amount <= Decimal::ZERO {
        return Err(AppError::validation(format!("{} must be positive", field)));
    }

    validate_scale(field, amount, AMOUNT_SCALE)?;
    validate_upper_bound(field, amount, max_amount())
}

/// Validates a non-negative amount with at most two decimal places
pub fn validate_non_negative_amount(field: &str, amount: Decimal) -> Result<()> {
    if amount < Decimal::ZERO {
        return Err(AppError::validation(format!("{} cannot be negative", field)));
    }

    validate_scale(field, amount, AMOUNT_SCALE)?;
    validate_upper_bound(field, amount, max_amount())
}

/// Validates a strictly positive quantity with at most three decimal places
pub fn validate_quantity(quantity: Decimal) -> Result<()> {
    if quantity <= Decimal::ZERO {
        return Err(AppError::validation("Quantity must be positive"));
    }

    validate_scale("Quantity", quantity, QUANTITY_SCALE)?;
    validate_upper_bound("Quantity", quantity, max_quantity())
}

/// Line total: quantity × unit price, rounded to the amount scale
///
/// Fails with a validation error when the product does not fit an amount column.
pub fn line_total(quantity: Decimal, unit_price: Decimal) -> Result<Decimal> {
    let total = quantity
        .checked_mul(unit_price)
        .map(round_amount)
        .ok_or_else(|| AppError::validation("Line total is too large"))?;

    validate_upper_bound("Line total", total, max_amount())?;
    Ok(total)
}

/// Sums amounts without overflowing, bounded by what an amount column holds
pub fn checked_total<I>(field: &str, amounts: I) -> Result<Decimal>
where
    I: IntoIterator<Item = Decimal>,
{
    let total = amounts
        .into_iter()
        .try_fold(Decimal::ZERO, |acc, amount| acc.checked_add(amount))
        .ok_or_else(|| AppError::validation(format!("{} is too large", field)))?;

    validate_upper_bound(field, total, max_amount())?;
    Ok(total)
}

/// Remaining due on a document, never negative
pub fn remaining_due(total_amount: Decimal, amount_paid: Decimal) -> Decimal {
    (total_amount - amount_paid).max(Decimal::ZERO)
}

fn validate_scale(field: &str, value: Decimal, max_scale: u32) -> Result<()> {
    // 250.00 and 250 are the same amount
    if value.normalize().scale() > max_scale {
        return Err(AppError::validation(format!(
            "{} must have at most {} decimal places, got {}",
            field, max_scale, value
        )));
    }

    Ok(())
}

fn validate_upper_bound(field: &str, value: Decimal, max: Decimal) -> Result<()> {
    if value > max {
        return Err(AppError::validation(format!("{} cannot exceed {}", field, max)));
    }

    Ok(())
}
