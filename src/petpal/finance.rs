//! Wallet, spending totals and the transaction ledger.

use super::validate::{parse_savings_goal, validate_budget, validate_item_cost, ValidationError};
use super::weekly::Ledger;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Category {
    Food,
    Toys,
    Cleaning,
    Vet,
    Tricks,
    Bills,
    Income,
}

impl Category {
    pub fn label(self) -> &'static str {
        match self {
            Category::Food => "food",
            Category::Toys => "toys",
            Category::Cleaning => "cleaning",
            Category::Vet => "vet",
            Category::Tricks => "tricks",
            Category::Bills => "bills",
            Category::Income => "income",
        }
    }
}

/// One ledger line. Income is stored with a negative amount.
#[derive(Clone, Debug, PartialEq)]
pub struct Expense {
    pub id: u64,
    pub category: Category,
    pub label: String,
    pub amount: i64,
    pub at_ms: u64,
}

/// Ledger lines of one category, summed.
#[derive(Clone, Debug, PartialEq)]
pub struct CategoryGroup {
    pub category: Category,
    pub count: usize,
    pub subtotal: i64,
}

pub struct Finance {
    pub wallet: i64,
    pub budget: i64,
    pub total_spent: i64,
    pub preventive_spending: i64,
    pub emergency_spending: i64,
    pub current_week_spending: i64,
    pub weekly_spending: Vec<i64>,
    pub savings_goal: Option<i64>,
    /// Chronological; newest last.
    pub expenses: Vec<Expense>,
    next_id: u64,
    clock_ms: u64,
}

impl Finance {
    pub fn new(budget: i64) -> Self {
        Self {
            wallet: budget,
            budget,
            total_spent: 0,
            preventive_spending: 0,
            emergency_spending: 0,
            current_week_spending: 0,
            weekly_spending: Vec::new(),
            savings_goal: None,
            expenses: Vec::new(),
            next_id: 1,
            clock_ms: 0,
        }
    }

    /// Timestamp applied to the next ledger lines.
    pub fn set_clock(&mut self, now_ms: u64) {
        self.clock_ms = now_ms;
    }

    fn push_entry(&mut self, category: Category, label: &str, amount: i64) {
        let id = self.next_id;
        self.next_id += 1;
        self.expenses.push(Expense {
            id,
            category,
            label: label.to_string(),
            amount,
            at_ms: self.clock_ms,
        });
    }

    /// Discretionary purchase. Refused when the wallet cannot cover it.
    pub fn spend(
        &mut self,
        amount: i64,
        category: Category,
        label: &str,
        preventive: bool,
    ) -> Result<(), ValidationError> {
        validate_item_cost(amount, self.wallet)?;

        self.wallet -= amount;
        self.total_spent += amount;
        if preventive {
            self.preventive_spending += amount;
        } else {
            self.emergency_spending += amount;
        }
        self.current_week_spending += amount;
        self.push_entry(category, label, amount);
        log::debug!("spent ${amount} on {label} ({}), wallet ${}", category.label(), self.wallet);
        Ok(())
    }

    pub fn earn(&mut self, amount: i64, label: &str) {
        let amount = amount.abs();
        self.wallet += amount;
        self.push_entry(Category::Income, label, -amount);
    }

    /// Fixed charge with no funds check; the wallet may go into debt.
    pub fn charge_bill(&mut self, amount: i64, label: &str) {
        self.wallet -= amount;
        self.total_spent += amount;
        self.push_entry(Category::Bills, label, amount);
        if self.wallet < 0 {
            log::warn!("wallet overdrawn after {label}: ${}", self.wallet);
        }
    }

    /// Close the week's discretionary spending into history.
    pub fn record_week_end(&mut self) {
        self.weekly_spending.push(self.current_week_spending);
        self.current_week_spending = 0;
    }

    pub fn set_savings_goal(&mut self, input: &str) -> Result<i64, ValidationError> {
        let goal = parse_savings_goal(input, self.budget)?;
        self.savings_goal = Some(goal);
        Ok(goal)
    }

    pub fn savings_goal_met(&self) -> Option<bool> {
        self.savings_goal.map(|goal| self.wallet >= goal)
    }

    /// Ledger grouped by category in order of first appearance.
    pub fn expense_report(&self) -> Vec<CategoryGroup> {
        let mut groups: Vec<CategoryGroup> = Vec::new();
        for e in &self.expenses {
            match groups.iter_mut().find(|g| g.category == e.category) {
                Some(g) => {
                    g.count += 1;
                    g.subtotal += e.amount;
                }
                None => groups.push(CategoryGroup {
                    category: e.category,
                    count: 1,
                    subtotal: e.amount,
                }),
            }
        }
        groups
    }

    /// Start over with a new (validated) budget.
    pub fn reset(&mut self, budget: i64) -> Result<(), ValidationError> {
        let budget = validate_budget(budget)?;
        *self = Finance::new(budget);
        Ok(())
    }

    pub fn total_income(&self) -> i64 {
        self.expenses
            .iter()
            .filter(|e| e.category == Category::Income)
            .map(|e| e.amount.abs())
            .sum()
    }

    pub fn total_bills(&self) -> i64 {
        self.expenses
            .iter()
            .filter(|e| e.category == Category::Bills)
            .map(|e| e.amount)
            .sum()
    }

    /// Most recent `n` ledger lines, newest first.
    pub fn recent(&self, n: usize) -> impl Iterator<Item = &Expense> {
        self.expenses.iter().rev().take(n)
    }
}

impl Ledger for Finance {
    fn charge_bill(&mut self, amount: i64, label: &str) {
        Finance::charge_bill(self, amount, label);
    }

    fn earn(&mut self, amount: i64, label: &str) {
        Finance::earn(self, amount, label);
    }
}

/// `$1,234`, `-$20`
pub fn format_money(amount: i64) -> String {
    let digits = amount.unsigned_abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    if amount < 0 {
        format!("-${}", grouped)
    } else {
        format!("${}", grouped)
    }
}

/// `+$5`, `-$3`, `+$0`
pub fn format_signed_money(amount: i64) -> String {
    if amount < 0 {
        format_money(amount)
    } else {
        format!("+{}", format_money(amount))
    }
}
