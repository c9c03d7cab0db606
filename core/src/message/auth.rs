//! message/auth.rs
//! Authentication (`A`) messages: shared tokens and signature references.

use tracing::debug;

use crate::crypto::{derive_auth_token, verify_payload_signature, AuthError, AuthMethod, WfAccount, WfSignature};
use crate::message::codec::WfCodec;
use crate::message::draft::DraftMessage;
use crate::message::fields::MessageFields;
use crate::schema::{names, MessageType};
use crate::types::WfError;

impl WfCodec {
    /// Authentication draft carrying a token derived from `secret`.
    /// `secret` is zeroised.
    pub fn new_auth_token_message(&self, secret: &mut [u8], address: &[u8]) -> Result<DraftMessage, WfError> {
        let token = derive_auth_token(secret, AuthMethod::SharedToken, address, self.version())?;
        let mut draft = self.new_message(MessageType::Authentication)?;
        draft.set(names::VERIFICATION_METHOD, &AuthMethod::SharedToken.code())?;
        draft.set(names::VERIFICATION_DATA, &token)?;
        Ok(draft)
    }

    /// Authentication draft pointing at a published signature.
    pub fn new_auth_signature_message(&self, url: &str) -> Result<DraftMessage, WfError> {
        let mut draft = self.new_message(MessageType::Authentication)?;
        draft.set(names::VERIFICATION_METHOD, &AuthMethod::DigitalSignature.code())?;
        draft.set(names::VERIFICATION_DATA, url)?;
        Ok(draft)
    }

    /// Check the token of an authentication message against `secret`.
    /// `secret` is zeroised.
    pub fn verify_auth_token<M: MessageFields + ?Sized>(
        &self,
        message: &M,
        secret: &mut [u8],
        address: &[u8],
    ) -> Result<(), WfError> {
        let expected = derive_auth_token(secret, AuthMethod::SharedToken, address, self.version())?;
        let data = auth_data(message, AuthMethod::SharedToken)?;
        if !data.eq_ignore_ascii_case(&expected) {
            return Err(AuthError::TokenMismatch.into());
        }
        debug!("authentication token verified");
        Ok(())
    }

    /// Check a signature against the URL referenced by an authentication message.
    pub fn verify_auth_signature<M: MessageFields + ?Sized>(
        &self,
        message: &M,
        account: &dyn WfAccount,
        signature: &WfSignature,
    ) -> Result<(), WfError> {
        let url = auth_data(message, AuthMethod::DigitalSignature)?;
        verify_payload_signature(account, signature, url)?;
        debug!(addr = %signature.payload.addr, "authentication signature verified");
        Ok(())
    }
}

/// Verification data of an authentication message using `method`.
fn auth_data<M: MessageFields + ?Sized>(message: &M, method: AuthMethod) -> Result<&str, AuthError> {
    let actual = match message.message_type() {
        MessageType::Authentication => message.get(names::VERIFICATION_METHOD).unwrap_or_default(),
        _ => "",
    };
    if AuthMethod::from_code(actual).ok() != Some(method) {
        return Err(AuthError::UnexpectedMethod { expected: method.code(), actual: actual.to_string() });
    }
    Ok(message.get(names::VERIFICATION_DATA).unwrap_or_default())
}
