//! Input validation for setup fields, prompts and purchases.
//!
//! Every check returns the trimmed, accepted value or a [`ValidationError`]
//! whose message is shown to the player as-is.

use thiserror::Error;

pub const PET_NAME_MAX: usize = 20;
pub const OWNER_NAME_MAX: usize = 30;
pub const TRICK_NAME_MAX: usize = 20;
pub const BUDGET_MIN: i64 = 50;
pub const BUDGET_MAX: i64 = 500;
pub const BUDGET_STEP: i64 = 10;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Pet name is required.")]
    PetNameRequired,
    #[error("Pet name must be 20 characters or less.")]
    PetNameTooLong,
    #[error("Use letters, numbers, and spaces only.")]
    PetNameCharset,
    #[error("Owner name is required.")]
    OwnerNameRequired,
    #[error("Owner name must be 30 characters or less.")]
    OwnerNameTooLong,
    #[error("Use letters, numbers, spaces, apostrophes, periods, or hyphens only.")]
    NameCharset,
    #[error("Budget must be a number.")]
    BudgetNotNumber,
    #[error("Budget must be between $50 and $500.")]
    BudgetOutOfRange,
    #[error("Budget must be in $10 increments.")]
    BudgetStep,
    #[error("Savings goal must be a number.")]
    GoalNotNumber,
    #[error("Savings goal must be greater than zero.")]
    GoalNotPositive,
    #[error("Savings goal cannot exceed the budget.")]
    GoalOverBudget,
    #[error("Savings goal must be a whole dollar amount.")]
    GoalFractional,
    #[error("Trick name is required.")]
    TrickRequired,
    #[error("Trick name must be 20 characters or less.")]
    TrickTooLong,
    #[error("That trick is already known.")]
    TrickKnown,
    #[error("Item cost must be greater than zero.")]
    CostNotPositive,
    #[error("You can't afford that yet.")]
    Unaffordable,
}

fn is_plain_name_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == ' '
}

fn is_extended_name_char(c: char) -> bool {
    is_plain_name_char(c) || matches!(c, '.' | '\'' | '-')
}

pub fn validate_pet_name(name: &str) -> Result<String, ValidationError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::PetNameRequired);
    }
    if trimmed.chars().count() > PET_NAME_MAX {
        return Err(ValidationError::PetNameTooLong);
    }
    if !trimmed.chars().all(is_plain_name_char) {
        return Err(ValidationError::PetNameCharset);
    }
    Ok(trimmed.to_string())
}

pub fn validate_owner_name(name: &str) -> Result<String, ValidationError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::OwnerNameRequired);
    }
    if trimmed.chars().count() > OWNER_NAME_MAX {
        return Err(ValidationError::OwnerNameTooLong);
    }
    if !trimmed.chars().all(is_extended_name_char) {
        return Err(ValidationError::NameCharset);
    }
    Ok(trimmed.to_string())
}

pub fn validate_budget(amount: i64) -> Result<i64, ValidationError> {
    if !(BUDGET_MIN..=BUDGET_MAX).contains(&amount) {
        return Err(ValidationError::BudgetOutOfRange);
    }
    if amount % BUDGET_STEP != 0 {
        return Err(ValidationError::BudgetStep);
    }
    Ok(amount)
}

/// Parse typed budget text ("120", "$120").
pub fn parse_budget(input: &str) -> Result<i64, ValidationError> {
    let digits = input.trim().trim_start_matches('$');
    let amount: i64 = digits.parse().map_err(|_| ValidationError::BudgetNotNumber)?;
    validate_budget(amount)
}

/// Parse and validate a savings goal typed into the prompt.
pub fn parse_savings_goal(input: &str, budget: i64) -> Result<i64, ValidationError> {
    let text = input.trim().trim_start_matches('$');
    let value: f64 = text.parse().map_err(|_| ValidationError::GoalNotNumber)?;
    if !value.is_finite() {
        return Err(ValidationError::GoalNotNumber);
    }
    if value <= 0.0 {
        return Err(ValidationError::GoalNotPositive);
    }
    if value > budget as f64 {
        return Err(ValidationError::GoalOverBudget);
    }
    if value.fract() != 0.0 {
        return Err(ValidationError::GoalFractional);
    }
    Ok(value as i64)
}

pub fn validate_trick_name(name: &str, known: &[String]) -> Result<String, ValidationError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::TrickRequired);
    }
    if trimmed.chars().count() > TRICK_NAME_MAX {
        return Err(ValidationError::TrickTooLong);
    }
    if !trimmed.chars().all(is_extended_name_char) {
        return Err(ValidationError::NameCharset);
    }
    let lower = trimmed.to_lowercase();
    if known.iter().any(|t| t.to_lowercase() == lower) {
        return Err(ValidationError::TrickKnown);
    }
    Ok(trimmed.to_string())
}

pub fn validate_item_cost(cost: i64, wallet: i64) -> Result<(), ValidationError> {
    if cost <= 0 {
        return Err(ValidationError::CostNotPositive);
    }
    if wallet < cost {
        return Err(ValidationError::Unaffordable);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pet_name_rules() {
        assert_eq!(validate_pet_name("  Biscuit "), Ok("Biscuit".to_string()));
        assert_eq!(validate_pet_name("   "), Err(ValidationError::PetNameRequired));
        assert_eq!(
            validate_pet_name("abcdefghijklmnopqrstu"),
            Err(ValidationError::PetNameTooLong)
        );
        assert_eq!(validate_pet_name("Mr. Paws"), Err(ValidationError::PetNameCharset));
        assert!(validate_pet_name("Rex 2").is_ok());
    }

    #[test]
    fn owner_name_allows_punctuation() {
        assert_eq!(validate_owner_name("Jo O'Neil-Smith Jr."), Ok("Jo O'Neil-Smith Jr.".to_string()));
        assert_eq!(validate_owner_name(""), Err(ValidationError::OwnerNameRequired));
        assert_eq!(validate_owner_name("Ana!"), Err(ValidationError::NameCharset));
        assert_eq!(
            validate_owner_name(&"a".repeat(31)),
            Err(ValidationError::OwnerNameTooLong)
        );
    }

    #[test]
    fn budget_bounds_and_step() {
        assert_eq!(validate_budget(50), Ok(50));
        assert_eq!(validate_budget(500), Ok(500));
        assert_eq!(validate_budget(40), Err(ValidationError::BudgetOutOfRange));
        assert_eq!(validate_budget(510), Err(ValidationError::BudgetOutOfRange));
        assert_eq!(validate_budget(125), Err(ValidationError::BudgetStep));
        assert_eq!(parse_budget("$120"), Ok(120));
        assert_eq!(parse_budget("lots"), Err(ValidationError::BudgetNotNumber));
    }

    #[test]
    fn savings_goal_rules() {
        assert_eq!(parse_savings_goal("75", 200), Ok(75));
        assert_eq!(parse_savings_goal("$200", 200), Ok(200));
        assert_eq!(parse_savings_goal("0", 200), Err(ValidationError::GoalNotPositive));
        assert_eq!(parse_savings_goal("-5", 200), Err(ValidationError::GoalNotPositive));
        assert_eq!(parse_savings_goal("201", 200), Err(ValidationError::GoalOverBudget));
        assert_eq!(parse_savings_goal("12.5", 200), Err(ValidationError::GoalFractional));
        assert_eq!(parse_savings_goal("abc", 200), Err(ValidationError::GoalNotNumber));
    }

    #[test]
    fn trick_rules() {
        let known = vec!["Roll Over".to_string()];
        assert_eq!(validate_trick_name(" Sit ", &known), Ok("Sit".to_string()));
        assert_eq!(validate_trick_name("roll over", &known), Err(ValidationError::TrickKnown));
        assert_eq!(validate_trick_name("", &known), Err(ValidationError::TrickRequired));
        assert_eq!(
            validate_trick_name("a very long trick name", &known),
            Err(ValidationError::TrickTooLong)
        );
        assert_eq!(validate_trick_name("High-5!", &known), Err(ValidationError::NameCharset));
    }

    #[test]
    fn item_cost_rules() {
        assert!(validate_item_cost(10, 10).is_ok());
        assert_eq!(validate_item_cost(11, 10), Err(ValidationError::Unaffordable));
        assert_eq!(validate_item_cost(0, 10), Err(ValidationError::CostNotPositive));
    }

    #[test]
    fn messages_are_player_facing() {
        assert_eq!(ValidationError::Unaffordable.to_string(), "You can't afford that yet.");
        assert_eq!(
            ValidationError::GoalOverBudget.to_string(),
            "Savings goal cannot exceed the budget."
        );
    }
}
