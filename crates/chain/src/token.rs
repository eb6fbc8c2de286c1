//! Read-only views of the standalone test token.

use alloy::{
    network::TransactionBuilder,
    primitives::{Address, U256},
    providers::Provider,
    rpc::types::TransactionRequest,
    sol_types::SolCall,
};
use eyre::{Result, WrapErr};

use crate::contracts::ITestToken;

#[derive(Debug, Clone)]
pub struct TokenSummary {
    pub name: String,
    pub symbol: String,
    pub decimals: u8,
    pub total_supply: U256,
    pub operator_balance: U256,
}

async fn view<P: Provider, C: SolCall>(provider: &P, token: Address, call: C) -> Result<C::Return> {
    let tx = TransactionRequest::default()
        .with_to(token)
        .with_input(call.abi_encode());
    let data = provider
        .call(tx)
        .await
        .wrap_err("token view call failed")?;
    C::abi_decode_returns(&data).wrap_err("unexpected token return data")
}

/// Reads the token's metadata and the operator's balance.
pub async fn summarize<P: Provider>(
    provider: &P,
    token: Address,
    operator: Address,
) -> Result<TokenSummary> {
    let name = view(provider, token, ITestToken::nameCall {}).await?;
    let symbol = view(provider, token, ITestToken::symbolCall {}).await?;
    let decimals = view(provider, token, ITestToken::decimalsCall {}).await?;
    let total_supply = view(provider, token, ITestToken::totalSupplyCall {}).await?;
    let operator_balance =
        view(provider, token, ITestToken::balanceOfCall { account: operator }).await?;

    Ok(TokenSummary {
        name,
        symbol,
        decimals,
        total_supply,
        operator_balance,
    })
}
