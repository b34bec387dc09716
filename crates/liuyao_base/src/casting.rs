//! Ways of obtaining six line specs: coin totals, random three-coin
//! tosses and number casting (mei hua).

use rand::Rng;
use serde::Serialize;

use crate::error::LiuyaoError;
use crate::hexagram::{LINE_COUNT, LineSpec};
use crate::trigram::Trigram;

/// Line for a three-coin total (heads 3, tails 2).
///
/// 6 old yin and 9 old yang move; 7 young yang and 8 young yin do not.
pub fn line_from_coins(total: u8) -> Result<LineSpec, LiuyaoError> {
    match total {
        6 => Ok(LineSpec::new(false, true)),
        7 => Ok(LineSpec::yang()),
        8 => Ok(LineSpec::yin()),
        9 => Ok(LineSpec::new(true, true)),
        _ => Err(LiuyaoError::input(format!("coin total must be 6..=9, got {total}"))),
    }
}

/// Six coin totals, bottom line first.
pub fn lines_from_coins(totals: &[u8]) -> Result<[LineSpec; LINE_COUNT], LiuyaoError> {
    let totals: &[u8; LINE_COUNT] = totals.try_into().map_err(|_| {
        LiuyaoError::input(format!("need {LINE_COUNT} coin totals, got {}", totals.len()))
    })?;
    let mut out = [LineSpec::yin(); LINE_COUNT];
    for (slot, &t) in out.iter_mut().zip(totals) {
        *slot = line_from_coins(t)?;
    }
    Ok(out)
}

/// Toss three coins per line.
pub fn cast_random<R: Rng + ?Sized>(rng: &mut R) -> [LineSpec; LINE_COUNT] {
    std::array::from_fn(|_| {
        let total: u8 = (0..3).map(|_| if rng.gen_bool(0.5) { 3 } else { 2 }).sum();
        match total {
            6 => LineSpec::new(false, true),
            7 => LineSpec::yang(),
            8 => LineSpec::yin(),
            _ => LineSpec::new(true, true),
        }
    })
}

/// Result of number casting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct NumberCast {
    pub upper: Trigram,
    pub lower: Trigram,
    /// Moving line, 1 (bottom) to 6 (top).
    pub moving_line: u8,
}

impl NumberCast {
    /// Line specs, bottom to top, with the single moving line flagged.
    pub fn lines(&self) -> [LineSpec; LINE_COUNT] {
        let lo = self.lower.lines();
        let up = self.upper.lines();
        std::array::from_fn(|i| {
            let is_yang = if i < 3 { lo[i] } else { up[i - 3] };
            LineSpec::new(is_yang, i + 1 == self.moving_line as usize)
        })
    }
}

fn trigram_number(n: u32) -> Result<Trigram, LiuyaoError> {
    let k = match n % 8 {
        0 => 8,
        r => r,
    };
    Trigram::from_xiantian_number(k as u8)
        .ok_or_else(|| LiuyaoError::lookup(format!("no trigram numbered {k}")))
}

fn line_number(n: u32) -> u8 {
    match n % 6 {
        0 => 6,
        r => r as u8,
    }
}

/// Number casting from a string of at least two digits.
///
/// Three digits read as upper, lower, moving line directly. Any other
/// length uses the digit sum for the upper trigram and moving line and the
/// digit count for the lower trigram.
pub fn cast_by_number(input: &str) -> Result<NumberCast, LiuyaoError> {
    let t = input.trim();
    let digits: Vec<u32> = t
        .chars()
        .map(|c| c.to_digit(10))
        .collect::<Option<_>>()
        .ok_or_else(|| LiuyaoError::input(format!("number casting needs digits only, got {input:?}")))?;
    if digits.len() < 2 {
        return Err(LiuyaoError::input("number casting needs at least two digits"));
    }

    let (upper, lower, moving) = if let [a, b, c] = digits[..] {
        (a, b, c)
    } else {
        let sum: u32 = digits.iter().sum();
        (sum, digits.len() as u32, sum)
    };
    Ok(NumberCast {
        upper: trigram_number(upper)?,
        lower: trigram_number(lower)?,
        moving_line: line_number(moving),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn coin_values() {
        assert_eq!(line_from_coins(6).unwrap(), LineSpec::new(false, true));
        assert_eq!(line_from_coins(9).unwrap(), LineSpec::new(true, true));
        assert!(matches!(line_from_coins(5), Err(LiuyaoError::InputValidation(_))));
        assert!(line_from_coins(10).is_err());
    }

    #[test]
    fn coin_count_checked() {
        assert!(lines_from_coins(&[7, 7, 7]).is_err());
        let lines = lines_from_coins(&[7, 8, 9, 6, 7, 8]).unwrap();
        assert!(lines[2].is_moving && lines[2].is_yang);
        assert!(lines[3].is_moving && !lines[3].is_yang);
    }

    #[test]
    fn three_digits_read_directly() {
        let c = cast_by_number("123").unwrap();
        assert_eq!(c.upper, Trigram::Qian);
        assert_eq!(c.lower, Trigram::Dui);
        assert_eq!(c.moving_line, 3);
        let c = cast_by_number("006").unwrap();
        assert_eq!((c.upper, c.lower, c.moving_line), (Trigram::Kun, Trigram::Kun, 6));
    }

    #[test]
    fn longer_input_uses_sum_and_count() {
        // sum 10 → upper 2 (Dui), count 4 → lower 4 (Zhen), moving 10 % 6 = 4
        let c = cast_by_number("1234").unwrap();
        assert_eq!(c.upper, Trigram::Dui);
        assert_eq!(c.lower, Trigram::Zhen);
        assert_eq!(c.moving_line, 4);
    }

    #[test]
    fn rejects_bad_input() {
        assert!(cast_by_number("7").is_err());
        assert!(cast_by_number("12a").is_err());
        assert!(cast_by_number("").is_err());
    }

    #[test]
    fn number_cast_lines() {
        let c = cast_by_number("123").unwrap();
        let lines = c.lines();
        // lower Dui = yang, yang, yin
        assert!(lines[0].is_yang && lines[1].is_yang && !lines[2].is_yang);
        assert!(lines[2].is_moving);
        assert_eq!(lines.iter().filter(|l| l.is_moving).count(), 1);
        assert!(lines[3..].iter().all(|l| l.is_yang));
    }

    #[test]
    fn random_cast_is_seed_stable() {
        let a = cast_random(&mut StdRng::seed_from_u64(7));
        let b = cast_random(&mut StdRng::seed_from_u64(7));
        assert_eq!(a, b);
    }
}
