//! Mini-app host shell
//!
//! The host tells us who is playing (if anyone) and wants to know when the
//! game is ready to be shown. Outside a host everything degrades to anonymous.

use serde::{Deserialize, Serialize};

/// What the host told us about the session
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HostContext {
    pub user_id: Option<u64>,
}

/// Whose data we are reading and writing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerNamespace {
    Fid(u64),
    Anonymous,
}

impl HostContext {
    pub fn anonymous() -> Self {
        Self::default()
    }

    pub fn namespace(&self) -> PlayerNamespace {
        match self.user_id {
            Some(fid) if fid != 0 => PlayerNamespace::Fid(fid),
            _ => PlayerNamespace::Anonymous,
        }
    }
}

impl PlayerNamespace {
    /// Suffix used in per-player storage keys
    pub fn key_suffix(&self) -> String {
        match self {
            PlayerNamespace::Fid(fid) => fid.to_string(),
            PlayerNamespace::Anonymous => "anon".to_string(),
        }
    }

    pub fn fid(&self) -> Option<u64> {
        match self {
            PlayerNamespace::Fid(fid) => Some(*fid),
            PlayerNamespace::Anonymous => None,
        }
    }
}

#[cfg(target_arch = "wasm32")]
mod web {
    use wasm_bindgen::prelude::*;

    #[wasm_bindgen(inline_js = r#"
export async function host_ready() {
    const sdk = globalThis.miniappSdk;
    if (!sdk || !sdk.actions) {
        return undefined;
    }
    await sdk.actions.ready();
    const ctx = await sdk.context;
    return ctx && ctx.user ? ctx.user.fid : undefined;
}
"#)]
    extern "C" {
        pub fn host_ready() -> js_sys::Promise;
    }
}

/// Tell the host we're ready and read the player id
///
/// Never fails: no host, a rejected promise or a non-numeric id all mean anonymous.
#[cfg(target_arch = "wasm32")]
pub async fn signal_ready() -> HostContext {
    match wasm_bindgen_futures::JsFuture::from(web::host_ready()).await {
        Ok(value) => {
            let user_id = value
                .as_f64()
                .filter(|fid| fid.is_finite() && *fid >= 1.0)
                .map(|fid| fid as u64);
            log::info!("Host ready (user: {:?})", user_id);
            HostContext { user_id }
        }
        Err(e) => {
            log::warn!("Host handshake failed, playing anonymously: {:?}", e);
            HostContext::anonymous()
        }
    }
}

/// Native: there is no host shell
#[cfg(not(target_arch = "wasm32"))]
pub async fn signal_ready() -> HostContext {
    HostContext::anonymous()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_namespace_from_context() {
        assert_eq!(
            HostContext { user_id: Some(42) }.namespace(),
            PlayerNamespace::Fid(42)
        );
        assert_eq!(HostContext::anonymous().namespace(), PlayerNamespace::Anonymous);
        // fid 0 is not a real account
        assert_eq!(
            HostContext { user_id: Some(0) }.namespace(),
            PlayerNamespace::Anonymous
        );
    }

    #[test]
    fn test_key_suffix() {
        assert_eq!(PlayerNamespace::Fid(7).key_suffix(), "7");
        assert_eq!(PlayerNamespace::Anonymous.key_suffix(), "anon");
    }
}
