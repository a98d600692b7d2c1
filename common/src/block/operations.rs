use crate::{
    config::{Preset, DEPOSIT_CONTRACT_TREE_DEPTH},
    crypto::{BlsPublicKey, BlsSignature, Hash},
    merkle::{container_root, vector_root, TreeHash},
    serializer::{ContainerWriter, Field, Reader, ReaderError, Serializer, Writer, OFFSET_SIZE},
};

use super::{IndexedAttestation, SignedBeaconBlockHeader};

// Deposit proofs carry the contract tree branch plus the length mix-in
pub const DEPOSIT_PROOF_LENGTH: usize = DEPOSIT_CONTRACT_TREE_DEPTH + 1;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ProposerSlashing {
    pub signed_header_1: SignedBeaconBlockHeader,
    pub signed_header_2: SignedBeaconBlockHeader,
}

impl Serializer for ProposerSlashing {
    const FIXED: bool = true;

    fn fixed_size(preset: &Preset) -> usize {
        SignedBeaconBlockHeader::fixed_size(preset) * 2
    }

    fn read(reader: &mut Reader) -> Result<Self, ReaderError> {
        Ok(Self {
            signed_header_1: SignedBeaconBlockHeader::read(reader)?,
            signed_header_2: SignedBeaconBlockHeader::read(reader)?,
        })
    }

    fn write(&self, writer: &mut Writer) {
        self.signed_header_1.write(writer);
        self.signed_header_2.write(writer);
    }
}

impl TreeHash for ProposerSlashing {
    fn tree_hash_root(&self, preset: &Preset) -> Hash {
        container_root(vec![
            self.signed_header_1.tree_hash_root(preset),
            self.signed_header_2.tree_hash_root(preset),
        ])
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AttesterSlashing {
    pub attestation_1: IndexedAttestation,
    pub attestation_2: IndexedAttestation,
}

impl Serializer for AttesterSlashing {
    const FIXED: bool = false;

    fn fixed_size(_: &Preset) -> usize {
        OFFSET_SIZE
    }

    fn read(reader: &mut Reader) -> Result<Self, ReaderError> {
        let mut fields = reader.read_container(&[Field::Variable, Field::Variable])?;
        Ok(Self {
            attestation_1: fields.next()?,
            attestation_2: fields.next()?,
        })
    }

    fn write(&self, writer: &mut Writer) {
        let mut container = ContainerWriter::new();
        container
            .field(&self.attestation_1)
            .field(&self.attestation_2);
        container.finish(writer);
    }
}

impl TreeHash for AttesterSlashing {
    fn tree_hash_root(&self, preset: &Preset) -> Hash {
        container_root(vec![
            self.attestation_1.tree_hash_root(preset),
            self.attestation_2.tree_hash_root(preset),
        ])
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DepositData {
    pub pubkey: BlsPublicKey,
    pub withdrawal_credentials: Hash,
    pub amount: u64,
    pub signature: BlsSignature,
}

impl Serializer for DepositData {
    const FIXED: bool = true;

    fn fixed_size(_: &Preset) -> usize {
        48 + 32 + 8 + 96
    }

    fn read(reader: &mut Reader) -> Result<Self, ReaderError> {
        Ok(Self {
            pubkey: BlsPublicKey::new(reader.read_array()?),
            withdrawal_credentials: reader.read_hash()?,
            amount: reader.read_u64()?,
            signature: BlsSignature::new(reader.read_array()?),
        })
    }

    fn write(&self, writer: &mut Writer) {
        self.pubkey.write(writer);
        writer.write_hash(&self.withdrawal_credentials);
        writer.write_u64(&self.amount);
        self.signature.write(writer);
    }
}

impl TreeHash for DepositData {
    fn tree_hash_root(&self, preset: &Preset) -> Hash {
        container_root(vec![
            self.pubkey.tree_hash_root(preset),
            self.withdrawal_credentials.clone(),
            self.amount.tree_hash_root(preset),
            self.signature.tree_hash_root(preset),
        ])
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Deposit {
    pub proof: [Hash; DEPOSIT_PROOF_LENGTH],
    pub data: DepositData,
}

impl Default for Deposit {
    fn default() -> Self {
        Self {
            proof: std::array::from_fn(|_| Hash::zero()),
            data: DepositData::default(),
        }
    }
}

impl Serializer for Deposit {
    const FIXED: bool = true;

    fn fixed_size(preset: &Preset) -> usize {
        DEPOSIT_PROOF_LENGTH * 32 + DepositData::fixed_size(preset)
    }

    fn read(reader: &mut Reader) -> Result<Self, ReaderError> {
        let mut proof = std::array::from_fn(|_| Hash::zero());
        for node in proof.iter_mut() {
            *node = reader.read_hash()?;
        }

        Ok(Self {
            proof,
            data: DepositData::read(reader)?,
        })
    }

    fn write(&self, writer: &mut Writer) {
        writer.write_vector(&self.proof);
        self.data.write(writer);
    }
}

impl TreeHash for Deposit {
    fn tree_hash_root(&self, preset: &Preset) -> Hash {
        container_root(vec![
            vector_root(&self.proof, preset),
            self.data.tree_hash_root(preset),
        ])
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct VoluntaryExit {
    pub epoch: u64,
    pub validator_index: u64,
}

impl Serializer for VoluntaryExit {
    const FIXED: bool = true;

    fn fixed_size(_: &Preset) -> usize {
        16
    }

    fn read(reader: &mut Reader) -> Result<Self, ReaderError> {
        Ok(Self {
            epoch: reader.read_u64()?,
            validator_index: reader.read_u64()?,
        })
    }

    fn write(&self, writer: &mut Writer) {
        writer.write_u64(&self.epoch);
        writer.write_u64(&self.validator_index);
    }
}

impl TreeHash for VoluntaryExit {
    fn tree_hash_root(&self, preset: &Preset) -> Hash {
        container_root(vec![
            self.epoch.tree_hash_root(preset),
            self.validator_index.tree_hash_root(preset),
        ])
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SignedVoluntaryExit {
    pub message: VoluntaryExit,
    pub signature: BlsSignature,
}

impl Serializer for SignedVoluntaryExit {
    const FIXED: bool = true;

    fn fixed_size(preset: &Preset) -> usize {
        VoluntaryExit::fixed_size(preset) + 96
    }

    fn read(reader: &mut Reader) -> Result<Self, ReaderError> {
        Ok(Self {
            message: VoluntaryExit::read(reader)?,
            signature: BlsSignature::new(reader.read_array()?),
        })
    }

    fn write(&self, writer: &mut Writer) {
        self.message.write(writer);
        self.signature.write(writer);
    }
}

impl TreeHash for SignedVoluntaryExit {
    fn tree_hash_root(&self, preset: &Preset) -> Hash {
        container_root(vec![
            self.message.tree_hash_root(preset),
            self.signature.tree_hash_root(preset),
        ])
    }
}
