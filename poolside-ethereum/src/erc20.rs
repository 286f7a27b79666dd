use alloy::{
    core::sol,
    primitives::{Address, U256},
    sol_types::SolCall,
};

// The ERC20 allowance surface the deposit flow touches.
// Signatures from EIP-20: https://eips.ethereum.org/EIPS/eip-20
sol! {
    function approve(address _spender, uint256 _value) public returns (bool success);
    function allowance(address _owner, address _spender) public view returns (uint256 remaining);
    function balanceOf(address _owner) public view returns (uint256 balance);
}

/// Encode approve(address,uint256) call
pub fn encode_approve(spender: Address, value: U256) -> Vec<u8> {
    approveCall { _spender: spender, _value: value }.abi_encode()
}

/// Encode allowance(address,address) call
pub fn encode_allowance(owner: Address, spender: Address) -> Vec<u8> {
    allowanceCall { _owner: owner, _spender: spender }.abi_encode()
}

/// Encode balanceOf(address) call
pub fn encode_balance_of(owner: Address) -> Vec<u8> {
    balanceOfCall { _owner: owner }.abi_encode()
}

/// Decode approve() return value
pub fn decode_approve(data: &[u8]) -> Result<bool, alloy::sol_types::Error> {
    approveCall::abi_decode_returns(data)
}

/// Decode allowance() return value
pub fn decode_allowance(data: &[u8]) -> Result<U256, alloy::sol_types::Error> {
    allowanceCall::abi_decode_returns(data)
}

/// Decode balanceOf() return value
pub fn decode_balance_of(data: &[u8]) -> Result<U256, alloy::sol_types::Error> {
    balanceOfCall::abi_decode_returns(data)
}
