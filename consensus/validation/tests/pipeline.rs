// Copyright (c) 2024 The Arx Foundation

//! End-to-end slow checks over a synthetic weave: a three-block
//! history with real Merkle trees, ed25519-signed transfers, and
//! deterministic hashing collaborators. Each rejection reason is
//! reached by mutating exactly one aspect of an otherwise valid
//! candidate.

use arx_blockchain_types::{
    digest_mod_weave, min_diff_fork_1_8, multiply_difficulty, Address, Anchor, Block, BlockHash,
    BlockIndex, BlockIndexEntry, BlockTxsPairs, DataRoot, Difficulty, ForkSchedule, PowDigest,
    ProofOfAccess, Tx, TxFormat, TxId, TxRoot, Wallet, WalletSnapshot, MAX_NONCE_SIZE,
    MAX_SIG_SIZE, RETARGET_BLOCK_TIME, TARGET_TIME,
};
use arx_consensus_validation::{
    compute_tx_root, is_retarget_height, BlockHasher, BlockValidator, Ed25519Verifier,
    OracleError, PoaError, PowHasher, ReturnCode, RetargetError, TxError, ValidationConfig,
    ValidationError,
};
use arx_crypto_merkle::{tree::MerkleTree, unbalanced};
use assert_matches::assert_matches;
use ed25519_dalek::{Signer, SigningKey};
use rand::{rngs::StdRng, SeedableRng};
use sha2::{Digest, Sha256, Sha384};

const CHUNK: usize = 256;

// Deterministic stand-ins for the node's hashing collaborators. The
// independent hash covers only fields no rejection test needs to
// mutate, so each mutation reaches the rule under test.
struct TestHashers;

impl BlockHasher for TestHashers {
    fn data_segment(&self, block: &Block, previous: &Block) -> Result<Vec<u8>, OracleError> {
        let mut segment = Vec::new();
        segment.extend_from_slice(previous.indep_hash.as_ref());
        segment.extend_from_slice(&block.height.to_be_bytes());
        segment.extend_from_slice(&block.timestamp.to_be_bytes());
        Ok(segment)
    }

    fn indep_hash(&self, block: &Block) -> Result<BlockHash, OracleError> {
        let mut hasher = Sha384::new();
        hasher.update(block.previous_block.as_ref());
        hasher.update(block.height.to_be_bytes());
        hasher.update(block.timestamp.to_be_bytes());
        hasher.update(block.reward_addr.as_ref());
        Ok(BlockHash(hasher.finalize().into()))
    }
}

// Saturated digest: satisfies every linear threshold.
struct MaxPow;

impl PowHasher for MaxPow {
    fn compute(&self, _: &[u8], _: &[u8], _: u64) -> Result<PowDigest, OracleError> {
        Ok(PowDigest([0xff; 32]))
    }
}

// Zero digest: satisfies no linear threshold.
struct ZeroPow;

impl PowHasher for ZeroPow {
    fn compute(&self, _: &[u8], _: &[u8], _: u64) -> Result<PowDigest, OracleError> {
        Ok(PowDigest::zero())
    }
}

struct FailingHashers;

impl BlockHasher for FailingHashers {
    fn data_segment(&self, _: &Block, _: &Block) -> Result<Vec<u8>, OracleError> {
        Err(OracleError::Timeout)
    }

    fn indep_hash(&self, _: &Block) -> Result<BlockHash, OracleError> {
        Err(OracleError::Timeout)
    }
}

struct WeaveTx {
    start: u128,
    end: u128,
    data_tree: MerkleTree,
    chunks: Vec<(u128, Vec<u8>)>,
}

struct WeaveBlock {
    start: u128,
    end: u128,
    tx_root: TxRoot,
    tx_tree: MerkleTree,
    txs: Vec<WeaveTx>,
}

struct Weave {
    blocks: Vec<WeaveBlock>,
}

impl Weave {
    // Three historical blocks, two data transactions each, two
    // 256-byte chunks per transaction.
    fn build() -> Self {
        let mut blocks = Vec::new();
        let mut weave_offset: u128 = 0;
        for b in 0u8..3 {
            let start = weave_offset;
            let mut txs = Vec::new();
            let mut tx_leaves = Vec::new();
            let mut block_offset: u128 = 0;
            for t in 0u8..2 {
                let tx_start = block_offset;
                let mut chunks = Vec::new();
                let mut chunk_leaves = Vec::new();
                let mut tx_offset: u128 = 0;
                for c in 0u8..2 {
                    let bytes = vec![b * 16 + t * 4 + c; CHUNK];
                    tx_offset += CHUNK as u128;
                    chunk_leaves.push((Sha256::digest(&bytes).into(), tx_offset));
                    chunks.push((tx_offset, bytes));
                }
                let data_tree = MerkleTree::from_leaves(&chunk_leaves).unwrap();
                block_offset += tx_offset;
                tx_leaves.push((data_tree.root_id(), block_offset));
                txs.push(WeaveTx {
                    start: tx_start,
                    end: block_offset,
                    data_tree,
                    chunks,
                });
            }
            let tx_tree = MerkleTree::from_leaves(&tx_leaves).unwrap();
            weave_offset += block_offset;
            blocks.push(WeaveBlock {
                start,
                end: weave_offset,
                tx_root: TxRoot(tx_tree.root_id()),
                tx_tree,
                txs,
            });
        }
        Self { blocks }
    }

    fn size(&self) -> u128 {
        self.blocks.last().map_or(0, |block| block.end)
    }

    fn proof_for(&self, byte: u128) -> ProofOfAccess {
        let block = self
            .blocks
            .iter()
            .find(|block| byte >= block.start && byte < block.end)
            .expect("byte inside the weave");
        let rel = byte - block.start;
        let tx = block
            .txs
            .iter()
            .find(|tx| rel >= tx.start && rel < tx.end)
            .expect("byte inside a tx");
        let tx_rel = rel - tx.start;
        let chunk = tx
            .chunks
            .iter()
            .find(|(end, _)| tx_rel < *end)
            .expect("byte inside a chunk");
        ProofOfAccess {
            option: 1,
            tx_path: block.tx_tree.path_for(rel),
            data_path: tx.data_tree.path_for(tx_rel),
            chunk: chunk.1.clone(),
        }
    }

    fn index(&self, tip_hash: BlockHash) -> BlockIndex {
        let mut entries: Vec<BlockIndexEntry> = self
            .blocks
            .iter()
            .enumerate()
            .rev()
            .map(|(i, block)| BlockIndexEntry {
                block_hash: BlockHash([i as u8 + 1; 48]),
                weave_size: block.end,
                tx_root: block.tx_root,
            })
            .collect();
        entries[0].block_hash = tip_hash;
        // Trailing genesis entry; it encloses no bytes.
        entries.push(BlockIndexEntry {
            block_hash: BlockHash([0; 48]),
            weave_size: 0,
            tx_root: TxRoot::zero(),
        });
        BlockIndex(entries)
    }
}

struct Fixture {
    weave: Weave,
    prev: Block,
    index: BlockIndex,
    forks: ForkSchedule,
}

fn fixture(prev_height: u64) -> Fixture {
    let weave = Weave::build();
    let mut prev = Block {
        height: prev_height,
        indep_hash: BlockHash::zero(),
        previous_block: BlockHash([7; 48]),
        timestamp: 1_600_000_000,
        last_retarget: 1_600_000_000,
        diff: min_diff_fork_1_8(),
        hash: PowDigest([0xff; 32]),
        nonce: vec![1, 2, 3],
        reward_addr: Address([1; 32]),
        reward_pool: 1_000_000,
        weave_size: weave.size(),
        tx_root: weave.blocks.last().unwrap().tx_root,
        block_index_root: BlockHash([13; 48]),
        poa: ProofOfAccess::default(),
        txs: Vec::new(),
    };
    prev.indep_hash = TestHashers.indep_hash(&prev).unwrap();
    let index = weave.index(prev.indep_hash);
    Fixture {
        weave,
        prev,
        index,
        forks: ForkSchedule::all_active(),
    }
}

fn signed_transfer(seed: u64, quantity: i128) -> Tx {
    let key = SigningKey::generate(&mut StdRng::seed_from_u64(seed));
    let mut tx = Tx {
        format: TxFormat::V2,
        id: TxId::zero(),
        last_tx: Anchor::NeverSpent,
        owner: key.verifying_key().to_bytes().to_vec(),
        target: Some(Address([9; 32])),
        quantity,
        data: Vec::new(),
        data_size: 0,
        data_root: DataRoot::zero(),
        reward: 2000,
        signature: Vec::new(),
    };
    tx.signature = key.sign(&tx.signature_message()).to_bytes().to_vec();
    tx.id = TxId(Sha256::digest(&tx.signature).into());
    tx
}

fn make_candidate(fx: &Fixture, txs: Vec<Tx>) -> Block {
    let height = fx.prev.height + 1;
    let (timestamp, last_retarget) = if is_retarget_height(height, &fx.forks) {
        let ts = fx.prev.last_retarget + RETARGET_BLOCK_TIME;
        (ts, ts)
    } else {
        (fx.prev.timestamp + TARGET_TIME, fx.prev.last_retarget)
    };
    let recall_digest = Sha256::digest(fx.prev.indep_hash.as_bytes());
    let recall_byte = digest_mod_weave(&recall_digest, fx.prev.weave_size);

    let entry = unbalanced::hash_block_index_entry(
        fx.prev.indep_hash.as_bytes(),
        fx.prev.weave_size,
        fx.prev.tx_root.as_bytes(),
    );
    let weave_size =
        fx.prev.weave_size + txs.iter().map(|tx| tx.data_size() as u128).sum::<u128>();
    let mut block = Block {
        height,
        indep_hash: BlockHash::zero(),
        previous_block: fx.prev.indep_hash,
        timestamp,
        last_retarget,
        diff: fx.prev.diff,
        hash: PowDigest([0xff; 32]),
        nonce: vec![4, 5, 6],
        reward_addr: Address([2; 32]),
        reward_pool: 900_000,
        weave_size,
        tx_root: compute_tx_root(&txs),
        block_index_root: BlockHash(unbalanced::extend_root(
            fx.prev.block_index_root.as_bytes(),
            &entry,
        )),
        poa: fx.weave.proof_for(recall_byte),
        txs,
    };
    block.indep_hash = TestHashers.indep_hash(&block).unwrap();
    block
}

fn funded(txs: &[Tx]) -> WalletSnapshot {
    txs.iter()
        .map(|tx| (tx.owner_address(), Wallet::with_balance(10_000_000)))
        .collect()
}

fn validator(forks: &ForkSchedule) -> BlockValidator<TestHashers, MaxPow, Ed25519Verifier> {
    let config = ValidationConfig {
        forks: forks.clone(),
        ..ValidationConfig::default()
    };
    BlockValidator::new(config, TestHashers, MaxPow, Ed25519Verifier)
}

#[test]
fn valid_block_is_accepted() {
    let fx = fixture(100);
    let txs = vec![signed_transfer(21, 500), signed_transfer(22, 700)];
    let wallets = funded(&txs);
    let block = make_candidate(&fx, txs);

    let outcome = validator(&fx.forks).validate_return(
        &block,
        &fx.prev,
        &wallets,
        &fx.index,
        &BlockTxsPairs::new(),
    );
    assert_eq!(outcome, ReturnCode::accepted());
    assert_eq!(outcome.message, "Block slow check OK");
}

#[test]
fn retarget_boundary_block_is_accepted() {
    // Height 100 sits on a boundary; the interval is on target so the
    // difficulty carries over and last_retarget snaps to the timestamp.
    let fx = fixture(99);
    let block = make_candidate(&fx, Vec::new());
    assert!(is_retarget_height(block.height, &fx.forks));
    assert_eq!(
        validator(&fx.forks).validate(
            &block,
            &fx.prev,
            &WalletSnapshot::new(),
            &fx.index,
            &BlockTxsPairs::new(),
        ),
        Ok(())
    );
}

fn reject(fx: &Fixture, block: &Block, wallets: &WalletSnapshot) -> ValidationError {
    validator(&fx.forks)
        .validate(block, &fx.prev, wallets, &fx.index, &BlockTxsPairs::new())
        .unwrap_err()
}

#[test]
fn height_window_is_enforced() {
    let fx = fixture(100);
    let mut block = make_candidate(&fx, Vec::new());
    block.height = fx.prev.height + 51;
    assert_eq!(reject(&fx, &block, &WalletSnapshot::new()), ValidationError::HeightTooFarAhead);
    block.height = 49;
    assert_eq!(reject(&fx, &block, &WalletSnapshot::new()), ValidationError::HeightTooFarBehind);
}

#[test]
fn difficulty_below_the_floor_is_rejected() {
    let fx = fixture(100);
    let mut block = make_candidate(&fx, Vec::new());
    block.diff = Difficulty::from(1u64);
    assert_eq!(reject(&fx, &block, &WalletSnapshot::new()), ValidationError::DifficultyTooLow);
}

#[test]
fn broken_chain_linkage_is_rejected() {
    let fx = fixture(100);
    let mut block = make_candidate(&fx, Vec::new());
    block.height = fx.prev.height + 2;
    assert_eq!(reject(&fx, &block, &WalletSnapshot::new()), ValidationError::InvalidPreviousHeight);

    let mut block = make_candidate(&fx, Vec::new());
    block.previous_block = BlockHash([0xee; 48]);
    assert_eq!(
        reject(&fx, &block, &WalletSnapshot::new()),
        ValidationError::InvalidPreviousBlockHash
    );
}

#[test]
fn tampered_poa_chunk_is_rejected() {
    let fx = fixture(100);
    let mut block = make_candidate(&fx, Vec::new());
    block.poa.chunk[0] ^= 0xff;
    assert_eq!(
        reject(&fx, &block, &WalletSnapshot::new()),
        ValidationError::Poa(PoaError::ChunkMismatch)
    );
}

#[test]
fn off_boundary_difficulty_change_is_rejected() {
    let fx = fixture(100);
    let mut block = make_candidate(&fx, Vec::new());
    block.diff = multiply_difficulty(fx.prev.diff, 2);
    assert_eq!(
        reject(&fx, &block, &WalletSnapshot::new()),
        ValidationError::Retarget(RetargetError::DifficultyMismatch)
    );
}

#[test]
fn dependent_hash_mismatch_is_rejected() {
    let fx = fixture(100);
    let mut block = make_candidate(&fx, Vec::new());
    block.hash = PowDigest::zero();
    assert_eq!(reject(&fx, &block, &WalletSnapshot::new()), ValidationError::InvalidDependentHash);
}

#[test]
fn weak_proof_of_work_is_rejected() {
    let fx = fixture(100);
    let mut block = make_candidate(&fx, Vec::new());
    // The zero digest matches the committed hash but sits below the
    // linear threshold.
    block.hash = PowDigest::zero();
    let config = ValidationConfig {
        forks: fx.forks.clone(),
        ..ValidationConfig::default()
    };
    let weak = BlockValidator::new(config, TestHashers, ZeroPow, Ed25519Verifier);
    assert_eq!(
        weak.validate(
            &block,
            &fx.prev,
            &WalletSnapshot::new(),
            &fx.index,
            &BlockTxsPairs::new(),
        ),
        Err(ValidationError::InvalidPow)
    );
}

#[test]
fn forged_independent_hash_is_rejected() {
    let fx = fixture(100);
    let mut block = make_candidate(&fx, Vec::new());
    block.indep_hash = BlockHash([0xcd; 48]);
    assert_eq!(
        reject(&fx, &block, &WalletSnapshot::new()),
        ValidationError::InvalidIndependentHash
    );
}

#[test]
fn joint_overspend_is_caught_by_the_ledger_replay() {
    // Each transfer fits the predecessor snapshot on its own, so the
    // per-tx checks pass; only the replayed ledger sees the sum.
    let fx = fixture(100);
    let txs = vec![signed_transfer(31, 6_000_000), signed_transfer(31, 6_000_001)];
    let wallets = funded(&txs);
    let block = make_candidate(&fx, txs);
    assert_eq!(reject(&fx, &block, &wallets), ValidationError::InvalidWalletList);
}

#[test]
fn oversized_fields_are_rejected() {
    let fx = fixture(100);
    let mut block = make_candidate(&fx, Vec::new());
    block.nonce = vec![0; MAX_NONCE_SIZE + 1];
    assert_eq!(
        reject(&fx, &block, &WalletSnapshot::new()),
        ValidationError::InvalidFieldSize("nonce".into())
    );

    let txs = vec![signed_transfer(41, 100)];
    let wallets = funded(&txs);
    let mut block = make_candidate(&fx, txs);
    block.txs[0].signature = vec![0; MAX_SIG_SIZE + 1];
    assert_eq!(
        reject(&fx, &block, &wallets),
        ValidationError::InvalidFieldSize("tx.signature".into())
    );
}

#[test]
fn stale_tx_anchor_is_rejected() {
    let fx = fixture(100);
    let key = SigningKey::generate(&mut StdRng::seed_from_u64(51));
    let mut tx = signed_transfer(51, 100);
    tx.last_tx = Anchor::TxId(TxId([6; 32]));
    tx.signature = key.sign(&tx.signature_message()).to_bytes().to_vec();
    tx.id = TxId(Sha256::digest(&tx.signature).into());
    let txs = vec![tx];
    let wallets = funded(&txs);
    let block = make_candidate(&fx, txs);
    assert_eq!(
        reject(&fx, &block, &wallets),
        ValidationError::Tx(TxError::AnchorNotFound)
    );
}

#[test]
fn fee_schedule_is_keyed_by_the_predecessor_height() {
    // The revised fee schedule activates exactly at the candidate's
    // height. Transactions were priced under the predecessor's rules,
    // so the old (doubled) per-byte rate still applies and the usual
    // 2000 reward lands under the floor.
    let mut fx = fixture(100);
    fx.forks.fork_1_9 = fx.prev.height + 1;
    let txs = vec![signed_transfer(61, 100)];
    let wallets = funded(&txs);
    let block = make_candidate(&fx, txs);
    assert_eq!(
        reject(&fx, &block, &wallets),
        ValidationError::Tx(TxError::RewardTooCheap)
    );

    // With the predecessor itself past the fork, the same reward
    // clears the halved rate.
    let mut fx = fixture(100);
    fx.forks.fork_1_9 = fx.prev.height;
    let txs = vec![signed_transfer(61, 100)];
    let wallets = funded(&txs);
    let block = make_candidate(&fx, txs);
    assert_eq!(
        validator(&fx.forks).validate(
            &block,
            &fx.prev,
            &wallets,
            &fx.index,
            &BlockTxsPairs::new(),
        ),
        Ok(())
    );
}

#[test]
fn structural_roots_are_verified_last() {
    let fx = fixture(100);

    let mut block = make_candidate(&fx, Vec::new());
    block.tx_root = TxRoot([0xab; 32]);
    assert_eq!(reject(&fx, &block, &WalletSnapshot::new()), ValidationError::InvalidTxRoot);

    let mut block = make_candidate(&fx, Vec::new());
    block.weave_size += 1;
    assert_eq!(reject(&fx, &block, &WalletSnapshot::new()), ValidationError::InvalidWeaveSize);

    let mut block = make_candidate(&fx, Vec::new());
    block.block_index_root = BlockHash([0xef; 48]);
    assert_eq!(
        reject(&fx, &block, &WalletSnapshot::new()),
        ValidationError::InvalidBlockIndexRoot
    );
}

#[test]
fn oracle_failure_rejects_the_block() {
    let fx = fixture(100);
    let block = make_candidate(&fx, Vec::new());
    let config = ValidationConfig {
        forks: fx.forks.clone(),
        ..ValidationConfig::default()
    };
    let broken = BlockValidator::new(config, FailingHashers, MaxPow, Ed25519Verifier);
    let outcome = broken.validate_return(
        &block,
        &fx.prev,
        &WalletSnapshot::new(),
        &fx.index,
        &BlockTxsPairs::new(),
    );
    assert_matches!(outcome, ReturnCode { accepted: false, code: 400, .. });
}
