//! In-memory execution environment.

use std::collections::HashMap;

use super::{InMemoryLedger, InMemoryToken};
use crate::domain::{Address, Amount};
use crate::error::AmmError;
use crate::traits::{Environment, FungibleToken};

/// Leading byte of sandbox-deployed token addresses.
const TOKEN_ADDRESS_TAG: u8 = 0x70;

/// Native ledger plus a set of deployed [`InMemoryToken`]s.
///
/// # Examples
///
/// ```
/// use cereal_swap::domain::{Address, Amount};
/// use cereal_swap::sandbox::InMemoryEnvironment;
/// use cereal_swap::traits::{Environment, FungibleToken};
///
/// let mut env = InMemoryEnvironment::new();
/// let alice = Address::from_bytes([1; 32]);
/// let token = env.deploy_token("CRL");
/// env.mint(&token, &alice, Amount::new(500)).ok();
/// assert_eq!(env.token(&token).map(|t| t.balance_of(&alice)).ok(), Some(Amount::new(500)));
/// ```
#[derive(Debug, Clone, Default)]
pub struct InMemoryEnvironment {
    native: InMemoryLedger,
    tokens: HashMap<Address, InMemoryToken>,
    deployed: u64,
}

impl InMemoryEnvironment {
    /// Creates an environment with an empty ledger and no tokens.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Deploys a fresh token and returns its contract address.
    pub fn deploy_token(&mut self, symbol: &str) -> Address {
        let mut bytes = [0u8; 32];
        bytes[0] = TOKEN_ADDRESS_TAG;
        bytes[24..].copy_from_slice(&self.deployed.to_be_bytes());
        self.deployed += 1;
        let address = Address::from_bytes(bytes);
        self.tokens.insert(address, InMemoryToken::new(symbol));
        tracing::debug!(%address, symbol, "token deployed");
        address
    }

    /// Mints `amount` of `token` to `to`.
    ///
    /// # Errors
    ///
    /// - [`AmmError::UnknownTokenContract`] if `token` was never deployed.
    /// - [`AmmError::Overflow`] if the supply would exceed `u128`.
    pub fn mint(&mut self, token: &Address, to: &Address, amount: Amount) -> Result<(), AmmError> {
        self.token_mut(token)?.mint(to, amount)
    }

    /// Credits `amount` of native currency to `to`.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::Overflow`] if the balance would exceed `u128`.
    pub fn fund(&mut self, to: &Address, amount: Amount) -> Result<(), AmmError> {
        self.native.credit(to, amount)
    }

    /// Sets `spender`'s allowance over `owner`'s `token` balance.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::UnknownTokenContract`] if `token` was never
    /// deployed.
    pub fn approve(
        &mut self,
        token: &Address,
        owner: &Address,
        spender: &Address,
        amount: Amount,
    ) -> Result<(), AmmError> {
        self.token_mut(token)?.approve(owner, spender, amount)
    }

    /// Balance of `account` in `token`, zero for unknown tokens.
    #[must_use]
    pub fn token_balance(&self, token: &Address, account: &Address) -> Amount {
        self.tokens
            .get(token)
            .map(|t| t.balance_of(account))
            .unwrap_or_default()
    }
}

impl Environment for InMemoryEnvironment {
    type Token = InMemoryToken;
    type Native = InMemoryLedger;

    fn native(&self) -> &Self::Native {
        &self.native
    }

    fn native_mut(&mut self) -> &mut Self::Native {
        &mut self.native
    }

    fn token(&self, contract: &Address) -> Result<&Self::Token, AmmError> {
        self.tokens
            .get(contract)
            .ok_or(AmmError::UnknownTokenContract(*contract))
    }

    fn token_mut(&mut self, contract: &Address) -> Result<&mut Self::Token, AmmError> {
        self.tokens
            .get_mut(contract)
            .ok_or(AmmError::UnknownTokenContract(*contract))
    }
}
