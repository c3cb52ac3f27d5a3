use std::sync::Arc;

use proptest::prelude::*;

use commitvote_engine::{CommitRevealEngine, VoteError};
use commitvote_nullables::NullLedger;
use commitvote_types::{ChoiceTag, CommitmentScheme, VoteStatus};

fn scheme() -> impl Strategy<Value = CommitmentScheme> {
    prop_oneof![
        Just(CommitmentScheme::Keccak256),
        Just(CommitmentScheme::Blake2bV1)
    ]
}

fn tag() -> impl Strategy<Value = u8> {
    prop_oneof![Just(1u8), Just(2u8)]
}

proptest! {
    /// Any committed pair reveals exactly once.
    #[test]
    fn committed_pair_reveals_once(
        scheme in scheme(),
        tag in tag(),
        secret in prop::collection::vec(any::<u8>(), 1..48),
    ) {
        let engine = CommitRevealEngine::new(Arc::new(NullLedger::new()), scheme);
        let c = engine.vote(tag, &secret).unwrap();
        prop_assert_eq!(engine.status(&c).unwrap(), VoteStatus::Pending);

        engine.reveal(tag, &secret, &c).unwrap();
        prop_assert_eq!(engine.reveal(tag, &secret, &c), Err(VoteError::AlreadyRevealed(c)));

        let chosen = ChoiceTag::try_from(tag).unwrap();
        prop_assert_eq!(engine.revealed_for(chosen).unwrap(), 1);
        prop_assert_eq!(engine.revealed_for(chosen.other()).unwrap(), 0);
    }

    /// Tags outside {1, 2} never reach the ledger.
    #[test]
    fn invalid_tags_never_write(raw in any::<u8>().prop_filter("invalid tag", |t| *t != 1 && *t != 2)) {
        let engine = CommitRevealEngine::new(Arc::new(NullLedger::new()), CommitmentScheme::Keccak256);
        prop_assert_eq!(engine.vote(raw, b"s"), Err(VoteError::InvalidChoice(raw.to_string())));
        prop_assert_eq!(engine.ledger().write_attempts(), 0);
    }

    /// Revealed counts plus pending always equal the total, whatever the
    /// mix of votes and reveals.
    #[test]
    fn tally_accounts_for_every_vote(
        votes in prop::collection::vec((tag(), any::<bool>()), 0..24),
    ) {
        let engine = CommitRevealEngine::new(Arc::new(NullLedger::new()), CommitmentScheme::Keccak256);
        let mut revealed = [0u64; 2];

        for (i, (tag, reveal)) in votes.iter().enumerate() {
            let secret = format!("voter-{i}");
            let c = engine.vote(*tag, secret.as_bytes()).unwrap();
            if *reveal {
                engine.reveal(*tag, secret.as_bytes(), &c).unwrap();
                revealed[usize::from(*tag - 1)] += 1;
            }
        }

        let tally = engine.tally().unwrap();
        prop_assert_eq!(tally.first, revealed[0]);
        prop_assert_eq!(tally.second, revealed[1]);
        prop_assert_eq!(tally.total, votes.len() as u64);
        prop_assert_eq!(tally.first + tally.second + tally.pending(), tally.total);

        let winner = engine.winner();
        match revealed[0].cmp(&revealed[1]) {
            std::cmp::Ordering::Greater => prop_assert_eq!(winner, Ok(ChoiceTag::First)),
            std::cmp::Ordering::Less => prop_assert_eq!(winner, Ok(ChoiceTag::Second)),
            std::cmp::Ordering::Equal if revealed[0] == 0 => {
                prop_assert_eq!(winner, Err(VoteError::NoRevealedVotes))
            }
            std::cmp::Ordering::Equal => prop_assert_eq!(winner, Err(VoteError::Tie(revealed[0]))),
        }
    }
}
