//! Canned answers returned when the proxy cannot be reached

use crate::types::InsightType;

pub fn canned_response(insight_type: InsightType) -> &'static str {
    match insight_type {
        InsightType::Trading => {
            "Market conditions look mixed. BTC is consolidating between key \
             support and resistance levels; consider waiting for a confirmed \
             breakout and always size positions with a stop-loss."
        }
        InsightType::Security => {
            "Unable to complete a live security scan. Never share your seed \
             phrase, verify contract addresses on a block explorer, and revoke \
             token approvals you no longer use."
        }
        InsightType::Contract => {
            "Automated audit unavailable. Check that the contract is verified, \
             ownership is renounced or behind a timelock, and no unrestricted \
             mint or blacklist functions exist."
        }
        InsightType::Fraud => {
            "Transaction review unavailable. Flag transfers to newly created \
             addresses, unusually large amounts, and rapid successive \
             withdrawals for manual review."
        }
        InsightType::Chart => {
            "Chart analysis unavailable. Look for higher highs and higher lows \
             to confirm an uptrend, and watch volume on any breakout attempt."
        }
        InsightType::News => {
            "Sentiment analysis unavailable. Treat headlines with caution and \
             wait for on-chain or price confirmation before acting."
        }
        InsightType::Assistant => {
            "I can help you find the dashboard, wallet, trading agent, backtest \
             engine and security tools from the navigation menu."
        }
        InsightType::General => {
            "Our AI assistant is temporarily unavailable. Please try again in \
             a moment."
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_type_has_canned_text() {
        for insight_type in InsightType::ALL {
            assert!(!canned_response(insight_type).is_empty());
        }
        assert_ne!(
            canned_response(InsightType::Security),
            canned_response(InsightType::General)
        );
    }
}
