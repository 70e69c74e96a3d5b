pub const IDENTITY: &str = "identity";
