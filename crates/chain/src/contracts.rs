//! Solidity interfaces of the deployed contract set.
//!
//! The access-control logic behind these entry points lives on-chain and is
//! opaque to this suite; only the call shapes matter here.

use alloy::sol;

// PDP aggregator: one decision entry point per escalation level. Level 0
// takes the full parameter set, level 3 only the drone identifier.
sol! {
    interface IPdp {
        function level0EvaluateAccess(uint256 droneId, string name, uint256 zone, string startTime, string endTime, bool granted) external;
        function level1EvaluateAccess(uint256 droneId, string name, uint256 zone, string startTime, string endTime) external;
        function level2EvaluateAccess(uint256 droneId, string name, uint256 zone) external;
        function level3EvaluateAccess(uint256 droneId) external;
    }
}

sol! {
    interface IDrone {
        function createDrone(string name, uint256 zone) external;
        function droneExists(uint256 droneId) external view returns (bool);
    }
}

sol! {
    interface IPolicy {
        function createPolicy(uint256 zone, string startTime, string endTime) external;
        function policyExists(uint256 zone) external view returns (bool);
    }
}

// Standalone test token, ERC-20 views only.
sol! {
    interface ITestToken {
        function name() external view returns (string);
        function symbol() external view returns (string);
        function decimals() external view returns (uint8);
        function totalSupply() external view returns (uint256);
        function balanceOf(address account) external view returns (uint256);
    }
}
