use std::str::FromStr;

use crate::DirectiveError;

/// Polarity of an axis directive.
///
/// `None` means the whole axis range; a forced polarity is used when one
/// physical axis is split into two logical directions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum AxisSign {
    #[default]
    None,
    Positive,
    Negative,
}

/// An orthogonal hat direction. Diagonals are not expressible in the
/// database format; combined masks are a decode error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HatDirection {
    Up,
    Right,
    Down,
    Left,
}

impl HatDirection {
    pub fn from_mask(mask: u32) -> Option<Self> {
        Some(match mask {
            1 => Self::Up,
            2 => Self::Right,
            4 => Self::Down,
            8 => Self::Left,
            _ => return None,
        })
    }

    pub fn mask(self) -> u32 {
        match self {
            Self::Up => 1,
            Self::Right => 2,
            Self::Down => 4,
            Self::Left => 8,
        }
    }
}

/// A decoded mapping-database entry. Parsed exactly once at load time,
/// never re-parsed per query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RawDirective {
    Button { id: u32 },
    Axis { id: u32, sign: AxisSign },
    Hat { id: u32, direction: HatDirection },
}

impl FromStr for RawDirective {
    type Err = DirectiveError;

    /// Decode a directive string.
    ///
    /// Grammar: `b<N>` button, `a<N>` axis, `+a<N>`/`-a<N>` axis with
    /// forced polarity, `h<N>.<mask>` hat. A trailing `~` (axis inversion
    /// hint used by some database generators) is tolerated and dropped.
    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let mut token = raw.trim();
        if token.is_empty() {
            return Err(DirectiveError::Empty);
        }

        let sign = match token.as_bytes()[0] {
            b'+' => {
                token = &token[1..];
                AxisSign::Positive
            }
            b'-' => {
                token = &token[1..];
                AxisSign::Negative
            }
            _ => AxisSign::None,
        };
        let token = token.strip_suffix('~').unwrap_or(token);

        let Some(kind) = token.chars().next() else {
            return Err(DirectiveError::Empty);
        };
        let body = &token[kind.len_utf8()..];

        match kind {
            'a' => {
                let id = parse_id(body)?;
                Ok(Self::Axis { id, sign })
            }
            'b' => {
                if sign != AxisSign::None {
                    return Err(DirectiveError::SignOnNonAxis(raw.to_string()));
                }
                let id = parse_id(body)?;
                Ok(Self::Button { id })
            }
            'h' => {
                if sign != AxisSign::None {
                    return Err(DirectiveError::SignOnNonAxis(raw.to_string()));
                }
                let (id, mask) = body
                    .split_once('.')
                    .ok_or_else(|| DirectiveError::MalformedHat(raw.to_string()))?;
                let id = parse_id(id)?;
                let mask = parse_id(mask)?;
                let direction = HatDirection::from_mask(mask)
                    .ok_or(DirectiveError::InvalidHatMask(mask))?;
                Ok(Self::Hat { id, direction })
            }
            _ => Err(DirectiveError::UnknownToken(raw.to_string())),
        }
    }
}

fn parse_id(body: &str) -> Result<u32, DirectiveError> {
    body.parse::<u32>()
        .map_err(|_| DirectiveError::InvalidId(body.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decode_button() {
        assert_eq!("b0".parse::<RawDirective>().unwrap(), RawDirective::Button {
            id: 0
        });
        assert_eq!(
            "b13".parse::<RawDirective>().unwrap(),
            RawDirective::Button { id: 13 }
        );
    }

    #[test]
    fn decode_axis_signs_are_symmetric() {
        let plus = "+a2".parse::<RawDirective>().unwrap();
        let minus = "-a2".parse::<RawDirective>().unwrap();
        assert_eq!(plus, RawDirective::Axis { id: 2, sign: AxisSign::Positive });
        assert_eq!(minus, RawDirective::Axis { id: 2, sign: AxisSign::Negative });
        assert_eq!(
            "a2".parse::<RawDirective>().unwrap(),
            RawDirective::Axis { id: 2, sign: AxisSign::None }
        );
    }

    #[test]
    fn decode_axis_inversion_hint_is_dropped() {
        assert_eq!(
            "a1~".parse::<RawDirective>().unwrap(),
            RawDirective::Axis { id: 1, sign: AxisSign::None }
        );
    }

    #[test]
    fn decode_hat_orthogonal_masks() {
        for (mask, direction) in [
            (1, HatDirection::Up),
            (2, HatDirection::Right),
            (4, HatDirection::Down),
            (8, HatDirection::Left),
        ] {
            let raw = format!("h0.{mask}");
            assert_eq!(
                raw.parse::<RawDirective>().unwrap(),
                RawDirective::Hat { id: 0, direction }
            );
        }
    }

    #[test]
    fn decode_hat_combined_mask_is_an_error() {
        for mask in [0, 3, 5, 9, 12, 16] {
            let raw = format!("h0.{mask}");
            assert!(matches!(
                raw.parse::<RawDirective>(),
                Err(DirectiveError::InvalidHatMask(m)) if m == mask
            ));
        }
    }

    #[test]
    fn decode_rejects_multibyte_kind_without_panicking() {
        for raw in ["é2", "±a2", "→0", "h́0.1"] {
            assert!(matches!(
                raw.parse::<RawDirective>(),
                Err(DirectiveError::UnknownToken(_) | DirectiveError::InvalidId(_))
            ));
        }
    }

    #[test]
    fn decode_rejects_garbage() {
        assert!(matches!(
            "".parse::<RawDirective>(),
            Err(DirectiveError::Empty)
        ));
        assert!("x7".parse::<RawDirective>().is_err());
        assert!("bx".parse::<RawDirective>().is_err());
        assert!("h0".parse::<RawDirective>().is_err());
        assert!("-b2".parse::<RawDirective>().is_err());
        assert!("+h0.1".parse::<RawDirective>().is_err());
    }
}
