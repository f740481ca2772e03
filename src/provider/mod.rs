mod revocation;

pub use revocation::RevocationProvider;
