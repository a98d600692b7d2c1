use crate::{
    config::{Preset, FAR_FUTURE_EPOCH},
    crypto::{BlsPublicKey, Hash, BLS_PUBLIC_KEY_SIZE},
    merkle::{container_root, TreeHash},
    serializer::{Reader, ReaderError, Serializer, Writer},
};

// 48 + 32 + 8 + 1 + 8 * 4
pub const VALIDATOR_SIZE: usize = 121;

/// Registry entry of one validator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Validator {
    pub pubkey: BlsPublicKey,
    pub withdrawal_credentials: Hash,
    pub effective_balance: u64,
    pub slashed: bool,
    pub activation_eligibility_epoch: u64,
    pub activation_epoch: u64,
    pub exit_epoch: u64,
    pub withdrawable_epoch: u64,
}

impl Validator {
    /// Validator active from `activation_epoch` with no scheduled exit.
    pub fn active_from(activation_epoch: u64, effective_balance: u64) -> Self {
        Self {
            pubkey: BlsPublicKey::zero(),
            withdrawal_credentials: Hash::zero(),
            effective_balance,
            slashed: false,
            activation_eligibility_epoch: activation_epoch,
            activation_epoch,
            exit_epoch: FAR_FUTURE_EPOCH,
            withdrawable_epoch: FAR_FUTURE_EPOCH,
        }
    }

    // Active during [activation_epoch, exit_epoch)
    pub fn is_active_at(&self, epoch: u64) -> bool {
        self.activation_epoch <= epoch && epoch < self.exit_epoch
    }
}

impl Serializer for Validator {
    const FIXED: bool = true;

    fn fixed_size(_: &Preset) -> usize {
        VALIDATOR_SIZE
    }

    fn read(reader: &mut Reader) -> Result<Self, ReaderError> {
        Ok(Self {
            pubkey: BlsPublicKey::new(reader.read_array::<BLS_PUBLIC_KEY_SIZE>()?),
            withdrawal_credentials: reader.read_hash()?,
            effective_balance: reader.read_u64()?,
            slashed: reader.read_bool()?,
            activation_eligibility_epoch: reader.read_u64()?,
            activation_epoch: reader.read_u64()?,
            exit_epoch: reader.read_u64()?,
            withdrawable_epoch: reader.read_u64()?,
        })
    }

    fn write(&self, writer: &mut Writer) {
        self.pubkey.write(writer);
        writer.write_hash(&self.withdrawal_credentials);
        writer.write_u64(&self.effective_balance);
        writer.write_bool(self.slashed);
        writer.write_u64(&self.activation_eligibility_epoch);
        writer.write_u64(&self.activation_epoch);
        writer.write_u64(&self.exit_epoch);
        writer.write_u64(&self.withdrawable_epoch);
    }
}

impl TreeHash for Validator {
    fn tree_hash_root(&self, preset: &Preset) -> Hash {
        container_root(vec![
            self.pubkey.tree_hash_root(preset),
            self.withdrawal_credentials.clone(),
            self.effective_balance.tree_hash_root(preset),
            self.slashed.tree_hash_root(preset),
            self.activation_eligibility_epoch.tree_hash_root(preset),
            self.activation_epoch.tree_hash_root(preset),
            self.exit_epoch.tree_hash_root(preset),
            self.withdrawable_epoch.tree_hash_root(preset),
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validator_size() {
        let validator = Validator::active_from(0, 32_000_000_000);
        assert_eq!(validator.to_bytes().len(), VALIDATOR_SIZE);
    }

    #[test]
    fn test_activity_window() {
        let mut validator = Validator::active_from(2, 32_000_000_000);
        validator.exit_epoch = 5;
        assert!(!validator.is_active_at(1));
        assert!(validator.is_active_at(2));
        assert!(validator.is_active_at(4));
        assert!(!validator.is_active_at(5));
    }

    #[test]
    fn test_slashed_flag_must_be_boolean() {
        let preset = Preset::minimal();
        let mut bytes = Validator::active_from(0, 1).to_bytes();
        bytes[88] = 2;
        assert_eq!(
            Validator::from_bytes(&bytes, &preset),
            Err(ReaderError::InvalidValue)
        );
    }
}
