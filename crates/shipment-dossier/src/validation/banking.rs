use super::registry::fields::{BANKING_DETAILS, TOTAL_VALUE};
use super::value::FieldMap;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BankingCheckStatus {
    Match,
    Mismatch,
    NotApplicable,
}

impl BankingCheckStatus {
    pub fn label(&self) -> &'static str {
        match self {
            BankingCheckStatus::Match => "Match",
            BankingCheckStatus::Mismatch => "Mismatch",
            BankingCheckStatus::NotApplicable => "Not Applicable",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    Eur,
    Usd,
    Gbp,
}

impl Currency {
    pub fn code(&self) -> &'static str {
        match self {
            Currency::Eur => "EUR",
            Currency::Usd => "USD",
            Currency::Gbp => "GBP",
        }
    }

    pub fn symbol(&self) -> char {
        match self {
            Currency::Eur => '€',
            Currency::Usd => '$',
            Currency::Gbp => '£',
        }
    }

    /// First currency keyword found in free-form banking text.
    ///
    /// Keywords are checked in priority order `euro`, `usd`, then `uk`/`gbp`;
    /// the first hit wins.
    pub fn from_banking_text(text: &str) -> Option<Self> {
        let lowered = text.to_lowercase();
        if lowered.contains("euro") {
            Some(Currency::Eur)
        } else if lowered.contains("usd") {
            Some(Currency::Usd)
        } else if lowered.contains("uk") || lowered.contains("gbp") {
            Some(Currency::Gbp)
        } else {
            None
        }
    }
}

/// Outcome of the invoice-internal banking/currency consistency check.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BankingCheck {
    pub status: BankingCheckStatus,
    pub notes: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expected_currency: Option<Currency>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub banking_details: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_value: Option<String>,
}

/// Checks that the invoice total carries the symbol of the currency its
/// banking details are for. Only looks at the source-of-truth document.
pub fn check_banking(source_of_truth: &FieldMap) -> BankingCheck {
    let banking_details = source_of_truth.value(BANKING_DETAILS).to_text();
    let total_value = source_of_truth.value(TOTAL_VALUE).to_text();

    let Some(currency) = Currency::from_banking_text(&banking_details) else {
        return BankingCheck {
            status: BankingCheckStatus::NotApplicable,
            notes: "Banking details do not specify a checkable currency (Euro, USD, UK/GBP)."
                .to_string(),
            expected_currency: None,
            banking_details: None,
            total_value: None,
        };
    };

    let code = currency.code();
    let (status, notes) = if total_value.contains(currency.symbol()) {
        (
            BankingCheckStatus::Match,
            format!("Correct {code} banking details used for the {code} invoice total."),
        )
    } else {
        (
            BankingCheckStatus::Mismatch,
            format!(
                "Mismatch detected: Banking details are for {code}, but the invoice total currency does not match."
            ),
        )
    };

    BankingCheck {
        status,
        notes,
        expected_currency: Some(currency),
        banking_details: Some(banking_details),
        total_value: Some(total_value),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::value::FieldValue;

    fn invoice(banking: &str, total: &str) -> FieldMap {
        let mut map = FieldMap::new();
        map.insert(BANKING_DETAILS, FieldValue::from(banking));
        map.insert(TOTAL_VALUE, FieldValue::from(total));
        map
    }

    #[test]
    fn euro_account_with_euro_total_matches() {
        let check = check_banking(&invoice("Euro Account\nIBAN NL00 BANK 0123", "€120.00"));
        assert_eq!(check.status, BankingCheckStatus::Match);
        assert_eq!(check.expected_currency, Some(Currency::Eur));
        assert_eq!(check.total_value.as_deref(), Some("€120.00"));
    }

    #[test]
    fn euro_account_with_dollar_total_mismatches() {
        let check = check_banking(&invoice("Euro Account", "$120.00"));
        assert_eq!(check.status, BankingCheckStatus::Mismatch);
        assert!(check.notes.contains("Banking details are for EUR"));
    }

    #[test]
    fn banking_without_currency_keyword_is_not_applicable() {
        let check = check_banking(&invoice("Standard Bank, Branch 051001", "R 120.00"));
        assert_eq!(check.status, BankingCheckStatus::NotApplicable);
        assert!(check.banking_details.is_none());
    }

    #[test]
    fn keyword_priority_prefers_euro() {
        assert_eq!(
            Currency::from_banking_text("EURO and USD accounts"),
            Some(Currency::Eur)
        );
        assert_eq!(
            Currency::from_banking_text("Barclays UK, sort code 20-00-00"),
            Some(Currency::Gbp)
        );
    }

    #[test]
    fn missing_banking_field_is_not_applicable() {
        let check = check_banking(&FieldMap::new());
        assert_eq!(check.status, BankingCheckStatus::NotApplicable);
    }
}
