use recarga_core::catalog::{self, Product};
use wasm_bindgen::JsCast;
use yew::prelude::*;
use yew_router::prelude::*;

use crate::components::{Footer, Header};
use crate::routes::Route;
use crate::storage;

fn game_tab(game: &'static catalog::Game, selected: bool, on_pick: Callback<&'static str>) -> Html {
    let onclick = {
        let on_pick = on_pick.clone();
        let id = game.id;
        Callback::from(move |_| on_pick.emit(id))
    };
    html! {
        <button
            type="button"
            class={classes!("game-tab", selected.then_some("game-tab-selected"))}
            onclick={onclick}
        >
            <img src={game.icon} alt={game.name} class="game-icon" />
            <span>{ game.name }</span>
        </button>
    }
}

fn pack_card(
    product: &'static Product,
    selected: bool,
    on_pick: Callback<&'static Product>,
) -> Html {
    let onclick = {
        let on_pick = on_pick.clone();
        Callback::from(move |_| on_pick.emit(product))
    };
    html! {
        <button
            type="button"
            class={classes!("pack-card", selected.then_some("pack-card-selected"))}
            onclick={onclick}
        >
            <img src={product.image} alt={product.name} class="pack-image" />
            <span class="pack-name">{ product.name }</span>
            <span class="pack-bonus">{ format!("+{} de bônus", product.bonus_amount) }</span>
            <span class="pack-price">{ product.formatted_price }</span>
        </button>
    }
}

/// Storefront entry point: game and pack selection plus player
/// identification.
#[function_component(Home)]
pub fn home() -> Html {
    let player_name = use_state(|| storage::load_player_name().unwrap_or_default());
    let selected = use_state(|| None::<&'static Product>);
    let game = use_state(|| {
        storage::load_selected_game().unwrap_or_else(|| catalog::DEFAULT_GAME_ID.to_string())
    });
    let navigator = use_navigator();

    // The selection is persisted immediately: the post-payment resolver
    // consults it to skip the upsell chain for the companion title.
    let on_game_pick = {
        let game = game.clone();
        Callback::from(move |id: &'static str| {
            storage::save_selected_game(id);
            game.set(id.to_string());
        })
    };

    let on_name_input = {
        let player_name = player_name.clone();
        Callback::from(move |e: web_sys::InputEvent| {
            if let Some(input) = e
                .target()
                .and_then(|t| t.dyn_into::<web_sys::HtmlInputElement>().ok())
            {
                player_name.set(input.value());
            }
        })
    };

    let on_pick = {
        let selected = selected.clone();
        Callback::from(move |product: &'static Product| {
            selected.set(Some(product));
        })
    };

    let can_continue = !player_name.trim().is_empty() && selected.is_some();
    let on_continue = {
        let player_name = player_name.clone();
        let selected = selected.clone();
        Callback::from(move |_| {
            let (Some(product), name) = (*selected, player_name.trim()) else {
                return;
            };
            if name.is_empty() {
                return;
            }
            storage::save_player_name(name);
            storage::save_selected_product(product.id);
            if let Some(nav) = navigator.as_ref() {
                nav.push(&Route::Checkout);
            }
        })
    };

    let game_info = catalog::find_game(&game).unwrap_or(&catalog::GAMES[0]);

    html! {
        <div class="page home-page">
            <Header player_name={(!player_name.is_empty()).then(|| (*player_name).clone())} />
            <main id="main" role="main">
                <section class="panel games-panel">
                    <h2>{"Escolha seu jogo"}</h2>
                    <div class="game-tabs">
                        { for catalog::GAMES.iter().map(|g| {
                            game_tab(g, *game == g.id, on_game_pick.clone())
                        }) }
                    </div>
                </section>
                <section class="panel player-panel">
                    <h2>{"Identifique seu jogador"}</h2>
                    <label for="player-input">{"ID ou apelido do jogador"}</label>
                    <input
                        id="player-input"
                        type="text"
                        value={(*player_name).clone()}
                        oninput={on_name_input}
                        placeholder="Digite seu ID de jogador"
                    />
                </section>
                <section class="panel packs-panel">
                    <h2>{ format!("Escolha sua recarga de {}", game_info.currency_name) }</h2>
                    <div class="pack-grid">
                        { for catalog::DIAMOND_PACKS.iter().map(|p| {
                            let is_selected = selected.is_some_and(|s| s.id == p.id);
                            pack_card(p, is_selected, on_pick.clone())
                        }) }
                    </div>
                </section>
                <button
                    type="button"
                    class="btn-primary btn-continue"
                    disabled={!can_continue}
                    onclick={on_continue}
                >
                    {"Comprar agora"}
                </button>
            </main>
            <Footer />
        </div>
    }
}
