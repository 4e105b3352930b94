use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct Props {
    /// Diamond balance shown next to the player badge, when known.
    #[prop_or_default]
    pub player_name: Option<String>,
}

#[function_component(Header)]
pub fn header(p: &Props) -> Html {
    html! {
        <header role="banner" class="site-header">
            <div class="header-content">
                <img src="/assets/logo.png" alt="Recarga Jogo" class="header-logo" />
                {
                    if let Some(name) = &p.player_name {
                        html! {
                            <div class="player-badge">
                                <span class="player-label">{"Jogador: "}</span>
                                <span class="player-name">{ name.clone() }</span>
                            </div>
                        }
                    } else {
                        Html::default()
                    }
                }
            </div>
        </header>
    }
}
