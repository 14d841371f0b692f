//! Channel selection and the evaluated conductance container.

use std::str::FromStr;

use ndarray::ArrayD;
use serde::{Deserialize, Serialize};

use crate::errors::{ConductanceError, ConductanceResult};

/// Which conductance channel(s) an evaluator should produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Channel {
    Hall,
    Pedersen,
    /// Both channels, carried in (Hall, Pedersen) order.
    HallAndPedersen,
}

/// One physical conductance channel, used to drive per-channel evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ChannelKind {
    Hall,
    Pedersen,
}

impl FromStr for Channel {
    type Err = ConductanceError;

    /// Parse a channel token.
    ///
    /// Accepts exactly `h`, `hall`, `p`, `pedersen`, `hp` or
    /// `hallandpedersen`, case-insensitively. Any other token is an
    /// [`InvalidChannel`](ConductanceError::InvalidChannel) error; there is
    /// no substring matching.
    fn from_str(s: &str) -> ConductanceResult<Self> {
        match s.to_ascii_lowercase().as_str() {
            "h" | "hall" => Ok(Channel::Hall),
            "p" | "pedersen" => Ok(Channel::Pedersen),
            "hp" | "hallandpedersen" => Ok(Channel::HallAndPedersen),
            _ => Err(ConductanceError::InvalidChannel(s.to_string())),
        }
    }
}

/// Evaluated conductance, one array per requested channel.
///
/// Arrays share the broadcast shape of the coordinate inputs. Values are in
/// mho and never negative.
#[derive(Debug, Clone, PartialEq)]
pub enum ConductanceField {
    Hall(ArrayD<f64>),
    Pedersen(ArrayD<f64>),
    HallAndPedersen {
        hall: ArrayD<f64>,
        pedersen: ArrayD<f64>,
    },
}

impl ConductanceField {
    /// Evaluate `f` once per physical channel implied by `channel` and
    /// assemble the result.
    pub(crate) fn from_eval<F>(channel: Channel, mut f: F) -> Self
    where
        F: FnMut(ChannelKind) -> ArrayD<f64>,
    {
        match channel {
            Channel::Hall => ConductanceField::Hall(f(ChannelKind::Hall)),
            Channel::Pedersen => ConductanceField::Pedersen(f(ChannelKind::Pedersen)),
            Channel::HallAndPedersen => ConductanceField::HallAndPedersen {
                hall: f(ChannelKind::Hall),
                pedersen: f(ChannelKind::Pedersen),
            },
        }
    }

    /// The channel this field was evaluated for.
    pub fn channel(&self) -> Channel {
        match self {
            ConductanceField::Hall(_) => Channel::Hall,
            ConductanceField::Pedersen(_) => Channel::Pedersen,
            ConductanceField::HallAndPedersen { .. } => Channel::HallAndPedersen,
        }
    }

    /// Hall conductance, if the Hall channel was requested.
    pub fn hall(&self) -> Option<&ArrayD<f64>> {
        match self {
            ConductanceField::Hall(hall) => Some(hall),
            ConductanceField::HallAndPedersen { hall, .. } => Some(hall),
            ConductanceField::Pedersen(_) => None,
        }
    }

    /// Pedersen conductance, if the Pedersen channel was requested.
    pub fn pedersen(&self) -> Option<&ArrayD<f64>> {
        match self {
            ConductanceField::Pedersen(pedersen) => Some(pedersen),
            ConductanceField::HallAndPedersen { pedersen, .. } => Some(pedersen),
            ConductanceField::Hall(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn test_channel_tokens() {
        for (token, expected) in [
            ("h", Channel::Hall),
            ("H", Channel::Hall),
            ("hall", Channel::Hall),
            ("Hall", Channel::Hall),
            ("p", Channel::Pedersen),
            ("Pedersen", Channel::Pedersen),
            ("hp", Channel::HallAndPedersen),
            ("HP", Channel::HallAndPedersen),
            ("HallAndPedersen", Channel::HallAndPedersen),
        ] {
            assert_eq!(
                token.parse::<Channel>().unwrap(),
                expected,
                "token {:?} should parse",
                token
            );
        }
    }

    #[test]
    fn test_channel_rejects_unlisted_tokens() {
        // Closed token set: near-misses and substring-containing strings fail
        for token in ["", "x", "halls", "something-h", "hall and pedersen", "ph"] {
            let result = token.parse::<Channel>();
            assert!(
                matches!(result, Err(ConductanceError::InvalidChannel(_))),
                "token {:?} should be rejected, got {:?}",
                token,
                result
            );
        }
    }

    #[test]
    fn test_field_accessors() {
        let hall = array![1.0, 2.0].into_dyn();
        let pedersen = array![0.5, 1.5].into_dyn();

        let field = ConductanceField::HallAndPedersen {
            hall: hall.clone(),
            pedersen: pedersen.clone(),
        };
        assert_eq!(field.channel(), Channel::HallAndPedersen);
        assert_eq!(field.hall(), Some(&hall));
        assert_eq!(field.pedersen(), Some(&pedersen));

        let field = ConductanceField::Hall(hall.clone());
        assert_eq!(field.hall(), Some(&hall));
        assert_eq!(field.pedersen(), None);
    }

    #[test]
    fn test_from_eval_invokes_matching_channels() {
        let field = ConductanceField::from_eval(Channel::HallAndPedersen, |kind| match kind {
            ChannelKind::Hall => array![1.0].into_dyn(),
            ChannelKind::Pedersen => array![2.0].into_dyn(),
        });

        assert_eq!(field.hall().unwrap()[[0]], 1.0);
        assert_eq!(field.pedersen().unwrap()[[0]], 2.0);
    }
}
