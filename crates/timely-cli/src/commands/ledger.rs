// crates/timely-cli/src/commands/ledger.rs
//
// `timely ledger <subcommand>`: manage the local token ledger that rewards
// are paid from. Accounts, token creation, issuance, and balances.

use clap::Subcommand;

use timely_core::asset::{Asset, Symbol};
use timely_core::name::AccountName;

use super::{save, CliError, Context};
use crate::output::{self, BalanceRow};

/// Local token ledger subcommands.
#[derive(Debug, Subcommand)]
pub enum LedgerCmd {
    /// Register an account.
    Account {
        name: AccountName,
    },

    /// Create a token on a token contract.
    Create {
        /// Token contract account.
        contract: AccountName,
        /// Account allowed to issue.
        issuer: AccountName,
        /// Maximum supply, e.g. "21000000.00000000 BTC".
        max_supply: Asset,
    },

    /// Mint tokens straight into an account.
    Issue {
        contract: AccountName,
        to: AccountName,
        quantity: Asset,
    },

    /// Show an account's balance of one token.
    Balance {
        contract: AccountName,
        owner: AccountName,
        /// Token symbol as `precision,CODE`.
        symbol: Symbol,
    },
}

/// Run a ledger subcommand.
pub fn run(ctx: &Context, cmd: &LedgerCmd) -> Result<(), CliError> {
    let contract = ctx.open()?;

    match cmd {
        LedgerCmd::Account { name } => {
            if contract.ledger().write().create_account(name) {
                println!("Account {} created.", name);
            } else {
                println!("Account {} already exists.", name);
            }
        }
        LedgerCmd::Create {
            contract: token_contract,
            issuer,
            max_supply,
        } => {
            contract
                .ledger()
                .write()
                .create_token(token_contract, issuer, max_supply)?;
            tracing::info!(contract = %token_contract, max_supply = %max_supply, "Token created");
            println!("Created {} on {}.", max_supply.symbol, token_contract);
        }
        LedgerCmd::Issue {
            contract: token_contract,
            to,
            quantity,
        } => {
            contract.ledger().write().issue(token_contract, to, quantity)?;
            tracing::info!(contract = %token_contract, to = %to, quantity = %quantity, "Tokens issued");
            println!("Issued {} to {}.", quantity, to);
        }
        LedgerCmd::Balance {
            contract: token_contract,
            owner,
            symbol,
        } => {
            let balance = contract.ledger().read().balance(token_contract, owner, symbol);
            let row = BalanceRow {
                contract: token_contract.to_string(),
                owner: owner.to_string(),
                balance: balance.to_string(),
            };
            output::emit(ctx.format, &row, std::slice::from_ref(&row));
            return Ok(());
        }
    }

    save(&contract)
}
