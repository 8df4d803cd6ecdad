//! Challenge links ("beat my score")
//!
//! A finished run can be shared as `/challenge?score=T&name=N&fid=F`. Opening
//! the link overlays a progress bar toward `T` and marks the run as beaten on
//! the first tick where the score exceeds it.

use serde::{Deserialize, Serialize};

/// Path the challenge page is served from
pub const CHALLENGE_PATH: &str = "/challenge";

/// Decoded challenge link
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChallengeLink {
    pub target_score: u64,
    pub challenger_name: String,
    pub challenger_fid: u64,
}

impl ChallengeLink {
    pub fn new(target_score: u64, challenger_name: impl Into<String>, challenger_fid: u64) -> Self {
        Self {
            target_score,
            challenger_name: challenger_name.into(),
            challenger_fid,
        }
    }

    /// Parse a location search string (`?score=..&name=..&fid=..`).
    ///
    /// `score` and `name` are required; an unparsable `fid` falls back to 0.
    pub fn from_query(query: &str) -> Option<Self> {
        let mut score = None;
        let mut name = None;
        let mut fid = 0;

        for pair in query.trim_start_matches('?').split('&') {
            let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
            match key {
                "score" => score = value.trim().parse::<u64>().ok(),
                "name" => name = Some(percent_decode(value)).filter(|n| !n.is_empty()),
                "fid" => fid = value.trim().parse::<u64>().unwrap_or(0),
                _ => {}
            }
        }

        Some(Self {
            target_score: score?,
            challenger_name: name?,
            challenger_fid: fid,
        })
    }

    /// Shareable URL rooted at `origin` (e.g. `https://benji.example`)
    pub fn to_url(&self, origin: &str) -> String {
        format!(
            "{}{}?score={}&name={}&fid={}",
            origin.trim_end_matches('/'),
            CHALLENGE_PATH,
            self.target_score,
            percent_encode(&self.challenger_name),
            self.challenger_fid
        )
    }

    /// Link for a finished run. Anonymous players share as "Anonymous" with fid 0.
    pub fn for_run(score: u64, fid: Option<u64>) -> Self {
        match fid {
            Some(fid) => Self::new(score, fid.to_string(), fid),
            None => Self::new(score, "Anonymous", 0),
        }
    }
}

/// Per-run progress toward a challenge target
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChallengeProgress {
    pub link: ChallengeLink,
    /// Tick on which the score first exceeded the target
    pub beaten_at_tick: Option<u64>,
}

impl ChallengeProgress {
    pub fn new(link: ChallengeLink) -> Self {
        Self {
            link,
            beaten_at_tick: None,
        }
    }

    pub fn target(&self) -> u64 {
        self.link.target_score
    }

    pub fn is_beaten(&self) -> bool {
        self.beaten_at_tick.is_some()
    }

    /// Record the score at the end of `tick`. Returns true only on the beating tick.
    pub fn observe(&mut self, score: u64, tick: u64) -> bool {
        if self.beaten_at_tick.is_none() && score > self.link.target_score {
            self.beaten_at_tick = Some(tick);
            return true;
        }
        false
    }

    /// Progress bar fill in [0, 1]
    pub fn fraction(&self, score: u64) -> f32 {
        if self.link.target_score == 0 {
            return 1.0;
        }
        (score as f64 / self.link.target_score as f64).clamp(0.0, 1.0) as f32
    }

    /// Forget the beaten marker (on restart)
    pub fn reset(&mut self) {
        self.beaten_at_tick = None;
    }
}

fn percent_encode(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for b in s.bytes() {
        match b {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' => {
                out.push(b as char)
            }
            _ => out.push_str(&format!("%{b:02X}")),
        }
    }
    out
}

fn percent_decode(s: &str) -> String {
    let bytes = s.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            b'%' if i + 2 < bytes.len() => {
                let hex = std::str::from_utf8(&bytes[i + 1..i + 3]).ok();
                match hex.and_then(|h| u8::from_str_radix(h, 16).ok()) {
                    Some(b) => {
                        out.push(b);
                        i += 3;
                        continue;
                    }
                    None => out.push(b'%'),
                }
            }
            b'+' => out.push(b' '),
            b => out.push(b),
        }
        i += 1;
    }
    String::from_utf8_lossy(&out).into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full_query() {
        let link = ChallengeLink::from_query("?score=1200&name=Ada%20L&fid=42").unwrap();
        assert_eq!(link.target_score, 1200);
        assert_eq!(link.challenger_name, "Ada L");
        assert_eq!(link.challenger_fid, 42);
    }

    #[test]
    fn test_parse_requires_score_and_name() {
        assert!(ChallengeLink::from_query("?name=Ada").is_none());
        assert!(ChallengeLink::from_query("?score=10").is_none());
        assert!(ChallengeLink::from_query("?score=abc&name=Ada").is_none());
        assert!(ChallengeLink::from_query("").is_none());
    }

    #[test]
    fn test_missing_fid_defaults_to_zero() {
        let link = ChallengeLink::from_query("score=5&name=Bo").unwrap();
        assert_eq!(link.challenger_fid, 0);
    }

    #[test]
    fn test_url_survives_parse() {
        let link = ChallengeLink::new(777, "Zoë & co", 9);
        let url = link.to_url("https://benji.example/");
        assert!(url.starts_with("https://benji.example/challenge?score=777&name="));
        let query = url.split_once('?').unwrap().1;
        assert_eq!(ChallengeLink::from_query(query).unwrap(), link);
    }

    #[test]
    fn test_for_run_anonymous() {
        let link = ChallengeLink::for_run(300, None);
        assert_eq!(link.challenger_name, "Anonymous");
        assert_eq!(link.challenger_fid, 0);
    }

    #[test]
    fn test_progress_beaten_once() {
        let mut progress = ChallengeProgress::new(ChallengeLink::new(10, "x", 0));
        assert!(!progress.observe(10, 10));
        assert!(progress.observe(11, 11));
        assert!(!progress.observe(12, 12));
        assert_eq!(progress.beaten_at_tick, Some(11));
    }

    #[test]
    fn test_progress_fraction() {
        let progress = ChallengeProgress::new(ChallengeLink::new(200, "x", 0));
        assert_eq!(progress.fraction(0), 0.0);
        assert!((progress.fraction(50) - 0.25).abs() < 1e-6);
        assert_eq!(progress.fraction(500), 1.0);
    }
}
