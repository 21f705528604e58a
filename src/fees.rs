// 6.0: fee income accrual. LP fees are settled once per range close, prorated by
// how long the range stayed open. two models: a flat monthly baseline and an
// annualized APY on deployed capital.

use crate::types::Quote;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FeeModel {
    /// Fixed monthly fee income prorated over the range duration.
    FlatBaseline { monthly_fees: Decimal },
    /// Deployed capital earning an annualized rate.
    AnnualApy { annual_rate: Decimal },
}

impl FeeModel {
    // 6.1: fees for one closing range.
    //   flat:  monthly / 30 * days
    //   apy:   capital * rate * (days / 365.25)
    pub fn accrue(&self, capital: Quote, duration_days: Decimal) -> Quote {
        match *self {
            FeeModel::FlatBaseline { monthly_fees } => {
                Quote::new(monthly_fees / dec!(30) * duration_days)
            }
            FeeModel::AnnualApy { annual_rate } => {
                Quote::new(capital.value() * annual_rate * (duration_days / dec!(365.25)))
            }
        }
    }

    /// Fee income per day under this model, for reporting.
    pub fn daily_fees(&self, capital: Quote) -> Quote {
        self.accrue(capital, Decimal::ONE)
    }
}
