// =============================================================================
// Signal Aggregator — qualitative tags and the overall call
// =============================================================================
//
// Each indicator's numeric reading maps to a tag:
//
//   RSI        > overbought => overbought, < oversold => oversold, else neutral
//   MACD       histogram > 0 => bullish, else bearish (no neutral state)
//   Bollinger  bandwidth < squeeze => squeeze, > expansion => expansion,
//              else normal
//   StochRSI   %K vs %D crossover, computed by the indicator itself
//
// The overall call is a strict-majority vote over three voters: the RSI zone
// (oversold => bullish, overbought => bearish, neutral abstains), MACD and
// Stochastic RSI.  Without a strict majority the call is neutral.

use serde::{Deserialize, Serialize};

use crate::runtime_config::SignalThresholds;
use crate::types::{BollingerSignal, Direction, MacdSignal, RsiSignal};

/// Per-indicator tags plus the combined verdict.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignalBundle {
    pub rsi: RsiSignal,
    pub macd: MacdSignal,
    pub bollinger: BollingerSignal,
    pub stoch_rsi: Direction,
    pub overall: Direction,
}

pub fn classify_rsi(rsi: f64, thresholds: &SignalThresholds) -> RsiSignal {
    if rsi > thresholds.rsi_overbought {
        RsiSignal::Overbought
    } else if rsi < thresholds.rsi_oversold {
        RsiSignal::Oversold
    } else {
        RsiSignal::Neutral
    }
}

pub fn classify_macd(histogram: f64) -> MacdSignal {
    if histogram > 0.0 {
        MacdSignal::Bullish
    } else {
        MacdSignal::Bearish
    }
}

pub fn classify_bollinger(bandwidth: f64, thresholds: &SignalThresholds) -> BollingerSignal {
    if bandwidth < thresholds.squeeze_bandwidth {
        BollingerSignal::Squeeze
    } else if bandwidth > thresholds.expansion_bandwidth {
        BollingerSignal::Expansion
    } else {
        BollingerSignal::Normal
    }
}

/// Strict-majority vote; neutral votes abstain but still count as voters.
pub fn majority_vote(votes: &[Direction]) -> Direction {
    let bullish = votes.iter().filter(|v| **v == Direction::Bullish).count();
    let bearish = votes.iter().filter(|v| **v == Direction::Bearish).count();

    if bullish * 2 > votes.len() {
        Direction::Bullish
    } else if bearish * 2 > votes.len() {
        Direction::Bearish
    } else {
        Direction::Neutral
    }
}

/// Build the full bundle from raw indicator readings.
pub fn aggregate_signals(
    rsi: f64,
    macd_histogram: f64,
    bollinger_bandwidth: f64,
    stoch_rsi: Direction,
    thresholds: &SignalThresholds,
) -> SignalBundle {
    let rsi = classify_rsi(rsi, thresholds);
    let macd = classify_macd(macd_histogram);
    let bollinger = classify_bollinger(bollinger_bandwidth, thresholds);
    let overall = majority_vote(&[rsi.vote(), macd.vote(), stoch_rsi]);

    SignalBundle {
        rsi,
        macd,
        bollinger,
        stoch_rsi,
        overall,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn thresholds() -> SignalThresholds {
        SignalThresholds::default()
    }

    #[test]
    fn rsi_zones() {
        let t = thresholds();
        assert_eq!(classify_rsi(75.0, &t), RsiSignal::Overbought);
        assert_eq!(classify_rsi(70.0, &t), RsiSignal::Neutral);
        assert_eq!(classify_rsi(50.0, &t), RsiSignal::Neutral);
        assert_eq!(classify_rsi(30.0, &t), RsiSignal::Neutral);
        assert_eq!(classify_rsi(12.0, &t), RsiSignal::Oversold);
    }

    #[test]
    fn macd_is_never_neutral() {
        assert_eq!(classify_macd(0.3), MacdSignal::Bullish);
        assert_eq!(classify_macd(-0.3), MacdSignal::Bearish);
        assert_eq!(classify_macd(0.0), MacdSignal::Bearish);
    }

    #[test]
    fn bollinger_regimes() {
        let t = thresholds();
        assert_eq!(classify_bollinger(0.0, &t), BollingerSignal::Squeeze);
        assert_eq!(classify_bollinger(0.03, &t), BollingerSignal::Normal);
        assert_eq!(classify_bollinger(0.2, &t), BollingerSignal::Expansion);
    }

    #[test]
    fn two_bullish_one_bearish_is_bullish() {
        use Direction::*;
        assert_eq!(majority_vote(&[Bullish, Bullish, Bearish]), Bullish);
        assert_eq!(majority_vote(&[Bearish, Neutral, Bearish]), Bearish);
    }

    #[test]
    fn no_majority_is_neutral() {
        use Direction::*;
        assert_eq!(majority_vote(&[Bullish, Bearish, Neutral]), Neutral);
        assert_eq!(majority_vote(&[Neutral, Bearish, Neutral]), Neutral);
        assert_eq!(majority_vote(&[]), Neutral);
    }

    #[test]
    fn aggregate_uses_contrarian_rsi_vote() {
        let t = thresholds();
        // Oversold RSI + positive histogram => two bullish votes.
        let bundle = aggregate_signals(20.0, 0.5, 0.03, Direction::Bearish, &t);
        assert_eq!(bundle.rsi, RsiSignal::Oversold);
        assert_eq!(bundle.macd, MacdSignal::Bullish);
        assert_eq!(bundle.bollinger, BollingerSignal::Normal);
        assert_eq!(bundle.overall, Direction::Bullish);

        // Overbought RSI + bearish MACD + bearish StochRSI.
        let bundle = aggregate_signals(85.0, -0.5, 0.1, Direction::Bearish, &t);
        assert_eq!(bundle.overall, Direction::Bearish);
        assert_eq!(bundle.bollinger, BollingerSignal::Expansion);
    }

    #[test]
    fn neutral_inputs_give_neutral_overall() {
        let bundle = aggregate_signals(50.0, 0.0, 0.0, Direction::Neutral, &thresholds());
        assert_eq!(bundle.macd, MacdSignal::Bearish);
        assert_eq!(bundle.overall, Direction::Neutral);
    }
}
