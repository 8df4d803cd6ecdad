//! Append-only, hash-chained activity log for autonomous agents
//!
//! Every entry links to the previous entry of the same agent. Entry ids are
//! SHA-256 digests of the entry contents, so an id pins down what was logged.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use sha2::{Digest, Sha256};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum AgentLogError {
    #[error("Log entry does not exist")]
    NotFound,
    #[error("Only owner")]
    OnlyOwner,
    #[error("Invalid address")]
    InvalidAddress,
    #[error("expected {expected} hex bytes: {input}")]
    InvalidHex { expected: usize, input: String },
}

fn parse_hex<const N: usize>(s: &str) -> Result<[u8; N], AgentLogError> {
    let invalid = || AgentLogError::InvalidHex {
        expected: N,
        input: s.to_string(),
    };
    let digits = s.strip_prefix("0x").unwrap_or(s);
    let bytes = hex::decode(digits).map_err(|_| invalid())?;
    bytes.try_into().map_err(|_| invalid())
}

/// 20-byte agent/account address
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Address(pub [u8; 20]);

impl Address {
    pub const ZERO: Address = Address([0; 20]);

    pub fn is_zero(&self) -> bool {
        *self == Self::ZERO
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(self.0))
    }
}

impl FromStr for Address {
    type Err = AgentLogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_hex(s).map(Address)
    }
}

/// 32-byte digest (entry ids, content hashes)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Hash32(pub [u8; 32]);

pub type EntryId = Hash32;

impl Hash32 {
    pub const ZERO: Hash32 = Hash32([0; 32]);

    /// SHA-256 of arbitrary bytes
    pub fn digest(data: impl AsRef<[u8]>) -> Self {
        Hash32(Sha256::digest(data.as_ref()).into())
    }

    pub fn is_zero(&self) -> bool {
        *self == Self::ZERO
    }
}

impl fmt::Display for Hash32 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(self.0))
    }
}

impl FromStr for Hash32 {
    type Err = AgentLogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_hex(s).map(Hash32)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogEntry {
    pub entry_id: EntryId,
    pub agent: Address,
    pub action_type: String,
    pub data_hash: Hash32,
    pub reasoning_hash: Hash32,
    /// Id of the agent's previous entry, zero for its first
    pub previous_hash: Hash32,
    /// Unix seconds supplied by the caller
    pub timestamp: u64,
    /// Position in the global log (0-based)
    pub sequence: u64,
}

impl LogEntry {
    fn compute_id(&self) -> EntryId {
        let mut hasher = Sha256::new();
        hasher.update(self.agent.0);
        hasher.update((self.action_type.len() as u64).to_be_bytes());
        hasher.update(self.action_type.as_bytes());
        hasher.update(self.data_hash.0);
        hasher.update(self.reasoning_hash.0);
        hasher.update(self.previous_hash.0);
        hasher.update(self.timestamp.to_be_bytes());
        hasher.update(self.sequence.to_be_bytes());
        Hash32(hasher.finalize().into())
    }
}

#[derive(Debug, Clone)]
pub struct AgentLog {
    owner: Address,
    entries: HashMap<EntryId, LogEntry>,
    by_agent: HashMap<Address, Vec<EntryId>>,
    global_count: u64,
}

impl AgentLog {
    pub fn new(owner: Address) -> Self {
        Self {
            owner,
            entries: HashMap::new(),
            by_agent: HashMap::new(),
            global_count: 0,
        }
    }

    pub fn owner(&self) -> Address {
        self.owner
    }

    pub fn transfer_ownership(&mut self, caller: Address, new_owner: Address) -> Result<(), AgentLogError> {
        if caller != self.owner {
            return Err(AgentLogError::OnlyOwner);
        }
        if new_owner.is_zero() {
            return Err(AgentLogError::InvalidAddress);
        }
        log::info!("Ownership transferred {} -> {}", self.owner, new_owner);
        self.owner = new_owner;
        Ok(())
    }

    /// Append an entry for `agent`, chained to its previous one
    pub fn create_log(
        &mut self,
        agent: Address,
        action_type: impl Into<String>,
        data_hash: Hash32,
        reasoning_hash: Hash32,
        timestamp: u64,
    ) -> EntryId {
        let previous_hash = self
            .by_agent
            .get(&agent)
            .and_then(|ids| ids.last().copied())
            .unwrap_or(Hash32::ZERO);

        let mut entry = LogEntry {
            entry_id: Hash32::ZERO,
            agent,
            action_type: action_type.into(),
            data_hash,
            reasoning_hash,
            previous_hash,
            timestamp,
            sequence: self.global_count,
        };
        entry.entry_id = entry.compute_id();
        let id = entry.entry_id;

        log::info!(
            "LogCreated {} by {} ({}) prev {}",
            id,
            agent,
            entry.action_type,
            previous_hash
        );
        self.global_count += 1;
        self.by_agent.entry(agent).or_default().push(id);
        self.entries.insert(id, entry);
        id
    }

    pub fn agent_log_count(&self, agent: Address) -> usize {
        self.by_agent.get(&agent).map_or(0, Vec::len)
    }

    /// Up to `limit` of the agent's entries starting at `offset`, oldest first
    pub fn agent_logs(&self, agent: Address, offset: usize, limit: usize) -> Vec<&LogEntry> {
        let Some(ids) = self.by_agent.get(&agent) else {
            return Vec::new();
        };
        ids.iter()
            .skip(offset)
            .take(limit)
            .filter_map(|id| self.entries.get(id))
            .collect()
    }

    pub fn verify_log(&self, id: &EntryId) -> Result<&LogEntry, AgentLogError> {
        self.entries.get(id).ok_or(AgentLogError::NotFound)
    }

    /// The entry exists, its contents still hash to its id, and it links to
    /// an existing entry of the same agent (or is that agent's first entry)
    pub fn verify_chain_integrity(&self, id: &EntryId) -> bool {
        let Some(entry) = self.entries.get(id) else {
            return false;
        };
        if entry.compute_id() != *id {
            return false;
        }
        if entry.previous_hash.is_zero() {
            return true;
        }
        self.entries
            .get(&entry.previous_hash)
            .is_some_and(|prev| prev.agent == entry.agent)
    }

    /// Total entries across all agents
    pub fn len(&self) -> u64 {
        self.global_count
    }

    pub fn is_empty(&self) -> bool {
        self.global_count == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn addr(n: u8) -> Address {
        let mut bytes = [0u8; 20];
        bytes[19] = n;
        Address(bytes)
    }

    const OWNER: u8 = 1;
    const AGENT1: u8 = 2;
    const AGENT2: u8 = 3;

    fn setup() -> AgentLog {
        AgentLog::new(addr(OWNER))
    }

    fn data() -> (Hash32, Hash32) {
        (Hash32::digest("data"), Hash32::digest("reasoning"))
    }

    #[test]
    fn sets_owner() {
        assert_eq!(setup().owner(), addr(OWNER));
    }

    #[test]
    fn create_log_counts_per_agent() {
        let mut log = setup();
        let (d, r) = data();
        assert_eq!(log.agent_log_count(addr(AGENT1)), 0);
        log.create_log(addr(AGENT1), "LOG1", d, r, 100);
        assert_eq!(log.agent_log_count(addr(AGENT1)), 1);
        log.create_log(addr(AGENT1), "LOG2", d, r, 101);
        assert_eq!(log.agent_log_count(addr(AGENT1)), 2);
        assert_eq!(log.len(), 2);
    }

    #[test]
    fn entry_ids_differ_between_agents() {
        let mut log = setup();
        let (d, r) = data();
        let a = log.create_log(addr(AGENT1), "ACTION", d, r, 100);
        let b = log.create_log(addr(AGENT2), "ACTION", d, r, 100);
        assert_ne!(a, b);
    }

    #[test]
    fn entries_link_to_previous() {
        let mut log = setup();
        let (d, r) = data();
        log.create_log(addr(AGENT1), "FIRST", d, r, 100);
        log.create_log(addr(AGENT1), "SECOND", d, r, 101);

        let logs = log.agent_logs(addr(AGENT1), 0, 10);
        assert_eq!(logs[0].previous_hash, Hash32::ZERO);
        assert_eq!(logs[1].previous_hash, logs[0].entry_id);
    }

    #[test]
    fn verify_log_finds_entry() {
        let mut log = setup();
        let (d, r) = data();
        let id = log.create_log(addr(AGENT1), "DECISION", d, r, 100);
        let entry = log.verify_log(&id).unwrap();
        assert_eq!(entry.action_type, "DECISION");
        assert_eq!(entry.agent, addr(AGENT1));

        let fake = Hash32::digest("fake");
        let err = log.verify_log(&fake).unwrap_err();
        assert_eq!(err.to_string(), "Log entry does not exist");
    }

    #[test]
    fn pagination() {
        let mut log = setup();
        let (d, r) = data();
        for i in 0..5 {
            log.create_log(addr(AGENT1), format!("LOG{i}"), d, r, 100 + i);
        }
        assert_eq!(log.agent_logs(addr(AGENT1), 0, 2).len(), 2);
        assert_eq!(log.agent_logs(addr(AGENT1), 2, 2).len(), 2);
        let last = log.agent_logs(addr(AGENT1), 4, 2);
        assert_eq!(last.len(), 1);
        assert_eq!(last[0].action_type, "LOG4");
        assert!(log.agent_logs(addr(AGENT1), 10, 5).is_empty());
        assert!(log.agent_logs(addr(AGENT2), 0, 5).is_empty());
    }

    #[test]
    fn chain_integrity() {
        let mut log = setup();
        let (d, r) = data();
        for i in 0..3 {
            log.create_log(addr(AGENT1), format!("LOG{i}"), d, r, 100 + i);
        }
        for entry in log.agent_logs(addr(AGENT1), 0, 10) {
            assert!(log.verify_chain_integrity(&entry.entry_id));
        }
        assert!(!log.verify_chain_integrity(&Hash32::digest("fake")));
    }

    #[test]
    fn tampered_entry_fails_integrity() {
        let mut log = setup();
        let (d, r) = data();
        let id = log.create_log(addr(AGENT1), "TRADE", d, r, 100);
        if let Some(entry) = log.entries.get_mut(&id) {
            entry.action_type = "GIFT".to_string();
        }
        assert!(!log.verify_chain_integrity(&id));
    }

    #[test]
    fn ownership_transfer_rules() {
        let mut log = setup();
        assert_eq!(
            log.transfer_ownership(addr(AGENT1), addr(AGENT2)),
            Err(AgentLogError::OnlyOwner)
        );
        assert_eq!(
            log.transfer_ownership(addr(OWNER), Address::ZERO),
            Err(AgentLogError::InvalidAddress)
        );
        log.transfer_ownership(addr(OWNER), addr(AGENT1)).unwrap();
        assert_eq!(log.owner(), addr(AGENT1));
        assert_eq!(AgentLogError::OnlyOwner.to_string(), "Only owner");
    }

    #[test]
    fn agents_are_separate() {
        let mut log = setup();
        let (d, r) = data();
        log.create_log(addr(AGENT1), "A1_LOG1", d, r, 1);
        log.create_log(addr(AGENT1), "A1_LOG2", d, r, 2);
        log.create_log(addr(AGENT2), "A2_LOG1", d, r, 3);

        assert_eq!(log.agent_log_count(addr(AGENT1)), 2);
        assert_eq!(log.agent_log_count(addr(AGENT2)), 1);
        assert_eq!(log.agent_logs(addr(AGENT2), 0, 10)[0].agent, addr(AGENT2));
        // Agent 2's first entry doesn't chain onto agent 1
        assert!(log.agent_logs(addr(AGENT2), 0, 10)[0].previous_hash.is_zero());
    }

    #[test]
    fn hex_round_trip() {
        let a: Address = "0x00000000000000000000000000000000000000ff".parse().unwrap();
        assert_eq!(a, addr(0xff));
        assert_eq!(a.to_string(), "0x00000000000000000000000000000000000000ff");
        assert!("0x1234".parse::<Address>().is_err());
        assert!("zz".parse::<Hash32>().is_err());
    }
}
