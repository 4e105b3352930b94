#![cfg(target_arch = "wasm32")]

use recarga_core::{IntentRepository, PaymentInstructions, PaymentIntent};
use recarga_web::storage::{self, SessionIntentStore};
use wasm_bindgen_test::*;

wasm_bindgen_test::wasm_bindgen_test_configure!(run_in_browser);

fn sample_intent() -> PaymentIntent {
    PaymentIntent {
        external_id: "ff-1700000000000".to_string(),
        created_at: 1_700_000_000_000,
        product_id: "pack-2180".to_string(),
        player_name: "Jogador".to_string(),
        amount: "R$ 27,90".to_string(),
        original_amount: "2.180".to_string(),
        bonus_amount: "2.180".to_string(),
        total_amount: "4.360".to_string(),
        instructions: PaymentInstructions {
            code: "00020126pix".to_string(),
            qrcode_base64: "iVBORw0KGgo=".to_string(),
        },
        status: None,
        provider_id: Some("tx-9".to_string()),
        amount_cents: 2790,
    }
}

#[wasm_bindgen_test]
fn intent_survives_a_save_and_load() {
    let store = SessionIntentStore;
    store.clear();
    assert_eq!(store.load().expect("load"), None);

    let intent = sample_intent();
    store.save(&intent).expect("save");
    assert_eq!(store.load().expect("load"), Some(intent));

    store.clear();
    assert_eq!(store.load().expect("load"), None);
}

#[wasm_bindgen_test]
fn clearing_twice_is_harmless() {
    let store = SessionIntentStore;
    store.save(&sample_intent()).expect("save");
    store.clear();
    store.clear();
    assert_eq!(store.load().expect("load"), None);
}

#[wasm_bindgen_test]
fn funnel_selections_round_trip() {
    storage::save_selected_product("pack-5600");
    assert_eq!(storage::load_selected_product().as_deref(), Some("pack-5600"));

    storage::save_player_name("Jogador99");
    assert_eq!(storage::load_player_name().as_deref(), Some("Jogador99"));

    let addons = vec!["addon-sombra".to_string(), "addon-barba".to_string()];
    storage::save_selected_addons(&addons);
    assert_eq!(storage::load_selected_addons(), addons);

    storage::save_selected_game("100151");
    assert_eq!(storage::load_selected_game().as_deref(), Some("100151"));
    storage::save_selected_game("100067");
    assert_eq!(storage::load_selected_game().as_deref(), Some("100067"));
}
