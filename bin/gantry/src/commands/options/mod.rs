pub(crate) mod gateway;
pub(crate) mod signer;
pub(crate) mod transaction;
