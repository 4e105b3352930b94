use yew::prelude::*;

#[function_component(Footer)]
pub fn footer() -> Html {
    let node = html! {
        <footer class="site-footer">
            <p>{"Pagamento processado em ambiente seguro."}</p>
            <p class="footer-copy">{"© 2024 Recarga Jogo. Todos os direitos reservados."}</p>
        </footer>
    };
    node
}
