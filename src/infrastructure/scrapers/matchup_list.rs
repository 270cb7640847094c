use super::sanitize::{decode_entities, matchup_fragment};
use super::PageExtractor;
use crate::domain::{MatchupRecord, MatchupSide, Period};
use crate::error::{PullError, Result};
use once_cell::sync::Lazy;
use regex::Regex;

/// Tokens per matchup: seven per side.
pub const TOKENS_PER_MATCHUP: usize = 14;
const TOKENS_PER_SIDE: usize = TOKENS_PER_MATCHUP / 2;

static TAG: Lazy<Regex> = Lazy::new(|| Regex::new(r"<[^<>]*>").unwrap());
static LABELS: Lazy<Regex> = Lazy::new(|| Regex::new(r"Waiver:|Streak:|View Game Center").unwrap());
static PUNCTUATION: Lazy<Regex> = Lazy::new(|| Regex::new(r"[,()]").unwrap());

#[derive(Debug, Default)]
pub struct MatchupListExtractor;

impl PageExtractor for MatchupListExtractor {
    type Record = MatchupRecord;

    fn extract(&self, page: &str, period: Period) -> Result<Option<Vec<MatchupRecord>>> {
        match matchup_fragment(page) {
            Some(fragment) => group_matchups(&tokenize(&fragment), period).map(Some),
            None => Ok(None),
        }
    }
}

/// Tags become line breaks; entities are decoded before labels and
/// punctuation go, so encoded commas and parentheses are stripped too.
pub fn tokenize(fragment: &str) -> Vec<String> {
    let text = TAG.replace_all(fragment, "\n");
    let text = decode_entities(&text);
    let text = LABELS.replace_all(&text, "");
    let text = PUNCTUATION.replace_all(&text, "");

    text.lines()
        .map(|line| line.trim().to_string())
        .filter(|token| !token.is_empty())
        .collect()
}

pub fn group_matchups(tokens: &[String], period: Period) -> Result<Vec<MatchupRecord>> {
    if tokens.len() % TOKENS_PER_MATCHUP != 0 {
        return Err(PullError::MalformedMatchup(format!(
            "{} tokens in week {period} is not a multiple of {TOKENS_PER_MATCHUP}",
            tokens.len()
        )));
    }

    tokens
        .chunks(TOKENS_PER_MATCHUP)
        .map(|chunk| {
            let (home, away) = chunk.split_at(TOKENS_PER_SIDE);
            Ok(MatchupRecord {
                home: parse_side(home)?,
                away: parse_side(away)?,
                year: period.year,
                week: period.week,
            })
        })
        .collect()
}

fn parse_side(tokens: &[String]) -> Result<MatchupSide> {
    let [team, owner, record, rank, streak, waiver, points] = tokens else {
        return Err(PullError::MalformedMatchup(format!(
            "expected {TOKENS_PER_SIDE} fields per side, got {}",
            tokens.len()
        )));
    };

    let (wins, losses, ties) = parse_record(record)?;

    Ok(MatchupSide {
        team: team.clone(),
        owner: owner.clone(),
        wins,
        losses,
        ties,
        rank: parse_field(rank, "rank")?,
        streak: streak.clone(),
        waiver: parse_field(waiver, "waiver")?,
        fantasy_pts: parse_field(points, "fantasy points")?,
    })
}

/// `"5-2-0"` → `(5, 2, 0)`. All three parts are required.
pub fn parse_record(token: &str) -> Result<(u32, u32, u32)> {
    let parts: Vec<&str> = token.split('-').collect();
    let [wins, losses, ties] = parts.as_slice() else {
        return Err(PullError::MalformedMatchup(format!(
            "record '{token}' is not W-L-T"
        )));
    };

    Ok((
        parse_field(wins, "wins")?,
        parse_field(losses, "losses")?,
        parse_field(ties, "ties")?,
    ))
}

fn parse_field<T: std::str::FromStr>(token: &str, field: &str) -> Result<T> {
    token
        .trim()
        .parse()
        .map_err(|_| PullError::MalformedMatchup(format!("{field} '{token}' is not numeric")))
}
