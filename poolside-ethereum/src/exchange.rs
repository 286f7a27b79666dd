use alloy::{core::sol, primitives::U256, sol_types::SolCall};

// Constant-product exchange interface for a single ETH/token pool. The
// contract mints its own ERC20 as the LP share, so removeLiquidity needs no
// separate approval.
sol! {
    function addLiquidity(uint256 _amount) public payable returns (uint256 minted);
    function removeLiquidity(uint256 _amount) public returns (uint256 eth_amount, uint256 token_amount);
    function getReserve() public view returns (uint256 reserve);
}

/// Encode addLiquidity(uint256) call; the ether side rides along as the
/// transaction value.
pub fn encode_add_liquidity(token_amount: U256) -> Vec<u8> {
    addLiquidityCall { _amount: token_amount }.abi_encode()
}

/// Encode removeLiquidity(uint256) call
pub fn encode_remove_liquidity(lp_amount: U256) -> Vec<u8> {
    removeLiquidityCall { _amount: lp_amount }.abi_encode()
}

/// Encode getReserve() call
pub fn encode_get_reserve() -> Vec<u8> {
    getReserveCall {}.abi_encode()
}

/// Decode addLiquidity() return value: the amount of LP tokens minted
pub fn decode_add_liquidity(data: &[u8]) -> Result<U256, alloy::sol_types::Error> {
    addLiquidityCall::abi_decode_returns(data)
}

/// Decode removeLiquidity() return values: (ether paid out, tokens paid out)
pub fn decode_remove_liquidity(data: &[u8]) -> Result<(U256, U256), alloy::sol_types::Error> {
    let ret = removeLiquidityCall::abi_decode_returns(data)?;
    Ok((ret.eth_amount, ret.token_amount))
}

/// Decode getReserve() return value
pub fn decode_get_reserve(data: &[u8]) -> Result<U256, alloy::sol_types::Error> {
    getReserveCall::abi_decode_returns(data)
}
