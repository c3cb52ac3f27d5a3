//! End-to-end ballots over both ledger backends.

use std::sync::Arc;

use commitvote_engine::VoteError;
use commitvote_nullables::NullLedger;
use commitvote_session::{SessionError, VotingSession};
use commitvote_store::{BallotStore, VoteLedger};
use commitvote_store_lmdb::{check_integrity, LmdbEnvironment};
use commitvote_types::{
    BallotConfig, ChoiceTag, Choices, Commitment, CommitmentScheme, VoteStatus,
};

fn config(scheme: CommitmentScheme) -> BallotConfig {
    BallotConfig::new(Choices::new("yes", "no").unwrap(), scheme)
}

fn three_voters_all_reveal<L: VoteLedger + BallotStore>(session: &VotingSession<L>) {
    let a = session.vote("yes", b"a").unwrap();
    let b = session.vote("no", b"b").unwrap();
    let c = session.vote("yes", b"c").unwrap();
    assert_eq!(session.total_votes().unwrap(), 3);
    assert_eq!(session.list_commitments().unwrap(), vec![a, b, c]);

    session.reveal("yes", b"a", &a).unwrap();
    session.reveal("no", b"b", &b).unwrap();
    session.reveal("yes", b"c", &c).unwrap();

    for commitment in [a, b, c] {
        assert_eq!(session.vote_status(&commitment).unwrap(), VoteStatus::Revealed);
    }
    assert_eq!(session.total_votes().unwrap(), 3);
    assert_eq!(session.winner().unwrap(), "yes");
}

fn reveal_with_other_choice_fails<L: VoteLedger + BallotStore>(session: &VotingSession<L>) {
    let x = session.vote("yes", b"x").unwrap();
    assert!(matches!(
        session.reveal("no", b"x", &x),
        Err(VoteError::CommitmentMismatch { .. })
    ));
    assert_eq!(session.vote_status(&x).unwrap(), VoteStatus::Pending);
}

#[test]
fn null_ledger_full_ballot() {
    let ledger = Arc::new(NullLedger::new());
    let session = VotingSession::initialize(ledger, config(CommitmentScheme::Keccak256)).unwrap();
    three_voters_all_reveal(&session);
    reveal_with_other_choice_fails(&session);
}

#[test]
fn lmdb_ledger_full_ballot() {
    let dir = tempfile::tempdir().unwrap();
    let env = LmdbEnvironment::open(dir.path(), 8, 1 << 22).unwrap();
    let session =
        VotingSession::initialize(Arc::new(env.ledger()), config(CommitmentScheme::Blake2bV1))
            .unwrap();
    three_voters_all_reveal(&session);
    reveal_with_other_choice_fails(&session);

    let report = check_integrity(&env).unwrap();
    assert!(report.is_healthy(), "{:?}", report.errors);
    assert_eq!(report.revealed, 3);
    assert_eq!(report.pending, 1);
}

#[test]
fn lmdb_ballot_and_votes_survive_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let commitment = {
        let env = LmdbEnvironment::open_default(dir.path()).unwrap();
        let session =
            VotingSession::initialize(Arc::new(env.ledger()), config(CommitmentScheme::Keccak256))
                .unwrap();
        session.vote("no", b"later").unwrap()
    };

    let env = LmdbEnvironment::open_default(dir.path()).unwrap();
    let ledger = Arc::new(env.ledger());
    assert!(matches!(
        VotingSession::initialize(Arc::clone(&ledger), config(CommitmentScheme::Keccak256)),
        Err(SessionError::AlreadyInitialized)
    ));

    let session = VotingSession::open(ledger).unwrap();
    assert_eq!(session.choices().label(ChoiceTag::Second), "no");
    assert_eq!(session.scheme(), CommitmentScheme::Keccak256);
    assert_eq!(session.vote_status(&commitment).unwrap(), VoteStatus::Pending);

    session.reveal("no", b"later", &commitment).unwrap();
    assert_eq!(session.winner().unwrap(), "no");
}

#[test]
fn lmdb_open_before_init_is_not_initialized() {
    let dir = tempfile::tempdir().unwrap();
    let env = LmdbEnvironment::open_default(dir.path()).unwrap();
    assert!(matches!(
        VotingSession::open(Arc::new(env.ledger())),
        Err(SessionError::NotInitialized)
    ));
}

#[test]
fn keccak_ballot_hashes_tag_tilde_secret() {
    let ledger = Arc::new(NullLedger::new());
    let session = VotingSession::initialize(ledger, config(CommitmentScheme::Keccak256)).unwrap();
    let commitment = session.vote("yes", b"secret").unwrap();
    assert_eq!(
        commitment.to_hex(),
        "0xae71c71a97e65eaa89a62b26de30e2cb6e465e97fa91c1f02dd9e021fd6eae44"
    );
    assert_eq!(
        commitment,
        Commitment::new(commitvote_crypto::keccak256(b"1~secret"))
    );
}

#[test]
fn no_reveals_then_tie_over_lmdb() {
    let dir = tempfile::tempdir().unwrap();
    let env = LmdbEnvironment::open_default(dir.path()).unwrap();
    let session =
        VotingSession::initialize(Arc::new(env.ledger()), config(CommitmentScheme::Keccak256))
            .unwrap();
    assert_eq!(session.winner(), Err(VoteError::NoRevealedVotes));

    let a = session.vote("yes", b"1").unwrap();
    let b = session.vote("no", b"2").unwrap();
    session.reveal("yes", b"1", &a).unwrap();
    session.reveal("no", b"2", &b).unwrap();
    assert_eq!(session.winner(), Err(VoteError::Tie(1)));
    assert_eq!(
        session.reveal("no", b"2", &b),
        Err(VoteError::AlreadyRevealed(b))
    );
}

#[test]
fn concurrent_identical_votes_over_lmdb_admit_one() {
    let dir = tempfile::tempdir().unwrap();
    let env = LmdbEnvironment::open_default(dir.path()).unwrap();
    let session =
        VotingSession::initialize(Arc::new(env.ledger()), config(CommitmentScheme::Keccak256))
            .unwrap();

    let accepted: usize = std::thread::scope(|s| {
        let handles: Vec<_> = (0..8)
            .map(|_| {
                let session = session.clone();
                s.spawn(move || session.vote("no", b"same").is_ok() as usize)
            })
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).sum()
    });

    assert_eq!(accepted, 1);
    assert_eq!(session.total_votes().unwrap(), 1);
}

#[test]
fn concurrent_reveals_of_one_commitment_count_once_over_lmdb() {
    let dir = tempfile::tempdir().unwrap();
    let env = LmdbEnvironment::open_default(dir.path()).unwrap();
    let session =
        VotingSession::initialize(Arc::new(env.ledger()), config(CommitmentScheme::Keccak256))
            .unwrap();
    let commitment = session.vote("yes", b"shared").unwrap();

    let results: Vec<Result<(), VoteError>> = std::thread::scope(|s| {
        let handles: Vec<_> = (0..8)
            .map(|_| {
                let session = session.clone();
                s.spawn(move || session.reveal("yes", b"shared", &commitment))
            })
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });

    assert_eq!(results.iter().filter(|r| r.is_ok()).count(), 1);
    for result in results.iter().filter_map(|r| r.as_ref().err()) {
        assert!(
            matches!(
                result,
                VoteError::AlreadyRevealed(_) | VoteError::LedgerWriteFailed(_)
            ),
            "unexpected {result:?}"
        );
    }

    let tally = session.tally().unwrap();
    assert_eq!(tally.choices[0].revealed, 1);
    assert_eq!(tally.choices[1].revealed, 0);
    assert_eq!(tally.total, 1);
    assert_eq!(session.vote_status(&commitment).unwrap(), VoteStatus::Revealed);
}
