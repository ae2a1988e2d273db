// Copyright (c) 2024 The Arx Foundation

//! The wallet ledger a candidate block is replayed against.

use arx_blockchain_types::{
    Address, Anchor, Block, Tx, Wallet, WalletSnapshot, GENESIS_BLOCK_REWARD,
    MINING_REWARD_POOL_DIVIDER, REWARD_HALVING_INTERVAL, TAIL_EMISSION,
};
use std::collections::HashMap;

/// The inflation component of the mining reward at `height`: the
/// genesis reward halved once per interval, floored at the tail
/// emission.
pub fn inflation_reward(height: u64) -> u128 {
    let halvings = height / REWARD_HALVING_INTERVAL;
    let base = if halvings >= 128 {
        0
    } else {
        GENESIS_BLOCK_REWARD >> halvings
    };
    base.max(TAIL_EMISSION)
}

/// The endowment pool and miner payout for a block collecting `fees`
/// on top of `previous_pool`. Returns `(new_pool, miner_reward)`.
///
/// Runs before the per-transaction checks, so `fees` may carry hostile
/// values; the sums saturate rather than wrap.
pub fn split_reward_pool(previous_pool: u128, fees: u128, height: u64) -> (u128, u128) {
    let pool = previous_pool.saturating_add(fees);
    let pool_share = pool / MINING_REWARD_POOL_DIVIDER;
    (
        pool - pool_share,
        inflation_reward(height).saturating_add(pool_share),
    )
}

// A u128 amount as a signed credit, pinned at i128::MAX when it does
// not fit.
fn clamp_credit(amount: u128) -> i128 {
    i128::try_from(amount).unwrap_or(i128::MAX)
}

#[derive(Clone, Debug)]
struct LedgerEntry {
    // Signed so a replay can drive a wallet negative and the validity
    // check can see it, instead of panicking or saturating.
    balance: i128,
    last_tx: Anchor,
}

/// A private, mutable working copy of a wallet snapshot.
///
/// Validation replays a candidate block's reward and transactions here
/// and then asks whether every spending wallet survived; the snapshot
/// itself is never touched.
#[derive(Clone, Debug)]
pub struct WalletLedger {
    wallets: HashMap<Address, LedgerEntry>,
}

impl WalletLedger {
    /// Copy a snapshot into a mutable ledger.
    pub fn from_snapshot(snapshot: &WalletSnapshot) -> Self {
        Self {
            wallets: snapshot
                .iter()
                .map(|(address, wallet)| {
                    (
                        *address,
                        LedgerEntry {
                            balance: clamp_credit(wallet.balance),
                            last_tx: wallet.last_tx,
                        },
                    )
                })
                .collect(),
        }
    }

    /// Replay a candidate block: the mining reward first, then every
    /// transaction in order. The reward split is keyed by the
    /// predecessor's height. Returns the endowment pool left behind
    /// after the miner's share is paid out.
    pub fn apply_block(&mut self, block: &Block, previous: &Block) -> u128 {
        let fees = block
            .txs
            .iter()
            .fold(0u128, |sum, tx| sum.saturating_add(tx.reward));
        let (new_pool, miner_reward) =
            split_reward_pool(previous.reward_pool, fees, previous.height);
        self.credit(block.reward_addr, clamp_credit(miner_reward));
        for tx in &block.txs {
            self.apply_tx(tx);
        }
        new_pool
    }

    /// Replay one transaction: debit the owner for the transfer and the
    /// fee, roll the owner's anchor forward, credit the target.
    ///
    /// The transaction has not been through `verify_tx` yet, so
    /// `quantity` and `reward` are attacker-controlled. All arithmetic
    /// saturates instead of wrapping; an unpayable debit leaves the
    /// owner's balance negative, which `is_wallet_valid` rejects.
    pub fn apply_tx(&mut self, tx: &Tx) {
        let debit = tx.quantity.saturating_add(clamp_credit(tx.reward));
        let owner = self.entry(tx.owner_address());
        owner.balance = owner.balance.saturating_sub(debit);
        owner.last_tx = Anchor::TxId(tx.id);
        if let Some(target) = tx.target {
            self.credit(target, tx.quantity);
        }
    }

    /// Whether the wallet that signed `tx` exists and is solvent after
    /// the replay.
    pub fn is_wallet_valid(&self, tx: &Tx) -> bool {
        self.wallets
            .get(&tx.owner_address())
            .is_some_and(|entry| entry.balance >= 0)
    }

    /// The replayed state of `address`, if the ledger has seen it.
    pub fn get(&self, address: &Address) -> Option<Wallet> {
        self.wallets.get(address).map(|entry| Wallet {
            balance: entry.balance.max(0) as u128,
            last_tx: entry.last_tx,
        })
    }

    fn credit(&mut self, address: Address, amount: i128) {
        let entry = self.entry(address);
        entry.balance = entry.balance.saturating_add(amount);
    }

    fn entry(&mut self, address: Address) -> &mut LedgerEntry {
        self.wallets.entry(address).or_insert(LedgerEntry {
            balance: 0,
            last_tx: Anchor::NeverSpent,
        })
    }
}
