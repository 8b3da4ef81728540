//! Pairwise consistency checks between two stations' logs.

use hashbrown::{HashMap, HashSet};

use crate::model::{
    contact::{Contact, ContactError, MatchOptions},
    log::Log,
};

/// Contacts of one log indexed by the callsign that logged them.
pub struct ContactIndex<'a> {
    contacts: &'a [Contact],
    by_sent_call: HashMap<&'a str, Vec<usize>>,
}

impl<'a> ContactIndex<'a> {
    /// Indexes every contact of `log`, scored and excluded alike.
    pub fn new(log: &'a Log) -> Self {
        let contacts = log.contacts();
        let mut by_sent_call: HashMap<&'a str, Vec<usize>> = HashMap::new();
        for (pos, contact) in contacts.iter().enumerate() {
            by_sent_call
                .entry(contact.sent_call.as_str())
                .or_default()
                .push(pos);
        }
        Self {
            contacts,
            by_sent_call,
        }
    }

    /// Positions of the indexed contacts that match `contact`, in file order.
    pub fn find_matches(
        &self,
        contact: &Contact,
        options: &MatchOptions,
    ) -> Result<Vec<usize>, ContactError> {
        let Some(candidates) = self.by_sent_call.get(contact.received_call.as_str()) else {
            return Ok(Vec::new());
        };
        let mut out = Vec::new();
        for &pos in candidates {
            if contact.match_against(&self.contacts[pos], options)? {
                out.push(pos);
            }
        }
        Ok(out)
    }

    /// Indexed contact at `pos`.
    pub fn get(&self, pos: usize) -> Option<&'a Contact> {
        self.contacts.get(pos)
    }
}

/// Outcome of [`cross_check`]. Positions index into each log's contacts.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CrossCheckReport {
    /// `(left, right)` pairs recording the same contact.
    pub matched: Vec<(usize, usize)>,
    /// Left contacts with no counterpart.
    pub unmatched_left: Vec<usize>,
    /// Right contacts with no counterpart.
    pub unmatched_right: Vec<usize>,
}

/// Pairs each contact of `left` with the first unused matching contact of `right`.
///
/// Pairing is greedy in file order; a right contact is used at most once.
pub fn cross_check(
    left: &Log,
    right: &Log,
    options: &MatchOptions,
) -> Result<CrossCheckReport, ContactError> {
    let index = ContactIndex::new(right);
    let mut used: HashSet<usize> = HashSet::new();
    let mut report = CrossCheckReport::default();

    for (left_pos, contact) in left.contacts().iter().enumerate() {
        let found = index
            .find_matches(contact, options)?
            .into_iter()
            .find(|pos| !used.contains(pos));
        match found {
            Some(right_pos) => {
                used.insert(right_pos);
                report.matched.push((left_pos, right_pos));
            }
            None => report.unmatched_left.push(left_pos),
        }
    }

    report.unmatched_right = (0..right.contacts().len())
        .filter(|pos| !used.contains(pos))
        .collect();
    Ok(report)
}
