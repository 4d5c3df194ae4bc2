//! Modal dialog for recording an investment.

use gpportal_shared::{InvestmentStatus, NewInvestment};
use leptos::prelude::*;

#[component]
pub fn AddInvestmentDialog(
    open: ReadSignal<bool>,
    set_open: WriteSignal<bool>,
    #[prop(into)] on_add: Callback<NewInvestment>,
) -> impl IntoView {
    let dialog_ref = NodeRef::<leptos::html::Dialog>::new();

    let (id_text, set_id_text) = signal(String::new());
    let (deal_name, set_deal_name) = signal(String::new());
    let (invested, set_invested) = signal(String::new());
    let (distributed, set_distributed) = signal(String::new());
    let (status, set_status) = signal(InvestmentStatus::Active);
    let (form_error, set_form_error) = signal(Option::<String>::None);

    let reset_form = move || {
        set_id_text.set(String::new());
        set_deal_name.set(String::new());
        set_invested.set(String::new());
        set_distributed.set(String::new());
        set_status.set(InvestmentStatus::Active);
        set_form_error.set(None);
    };

    // Drive the native dialog element from the open signal.
    Effect::new(move |_| {
        if let Some(dialog) = dialog_ref.get() {
            if open.get() {
                let _ = dialog.show_modal();
            } else {
                dialog.close();
            }
        }
    });

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let Ok(id) = id_text.get_untracked().trim().parse::<i64>() else {
            set_form_error.set(Some("Investment ID must be a number.".to_string()));
            return;
        };
        let name = deal_name.get_untracked().trim().to_string();
        if name.is_empty() {
            set_form_error.set(Some("Deal name is required.".to_string()));
            return;
        }
        let investment_total = invested.get_untracked().trim().parse::<f64>().unwrap_or(0.0);
        let distribution_total = distributed
            .get_untracked()
            .trim()
            .parse::<f64>()
            .unwrap_or(0.0);
        on_add.run(NewInvestment {
            id,
            deal_name: name,
            investment_total,
            distribution_total,
            status: status.get_untracked(),
        });
        reset_form();
        set_open.set(false);
    };

    view! {
        <dialog class="modal" node_ref=dialog_ref on:close=move |_| set_open.set(false)>
            <div class="modal-box">
                <h3 class="font-bold text-lg">"Add investment"</h3>
                <form class="mt-4 space-y-3" on:submit=on_submit>
                    <div class="form-control">
                        <label class="label" for="inv-id">
                            <span class="label-text">"Investment ID"</span>
                        </label>
                        <input
                            id="inv-id"
                            type="text"
                            inputmode="numeric"
                            placeholder="1001"
                            class="input input-bordered w-full"
                            prop:value=id_text
                            on:input=move |ev| set_id_text.set(event_target_value(&ev))
                            required
                        />
                    </div>
                    <div class="form-control">
                        <label class="label" for="inv-deal">
                            <span class="label-text">"Deal name"</span>
                        </label>
                        <input
                            id="inv-deal"
                            type="text"
                            placeholder="Riverside Fund II"
                            class="input input-bordered w-full"
                            prop:value=deal_name
                            on:input=move |ev| set_deal_name.set(event_target_value(&ev))
                            required
                        />
                    </div>
                    <div class="grid grid-cols-2 gap-3">
                        <div class="form-control">
                            <label class="label" for="inv-total">
                                <span class="label-text">"Invested"</span>
                            </label>
                            <input
                                id="inv-total"
                                type="number"
                                step="0.01"
                                min="0"
                                placeholder="50000"
                                class="input input-bordered w-full"
                                prop:value=invested
                                on:input=move |ev| set_invested.set(event_target_value(&ev))
                            />
                        </div>
                        <div class="form-control">
                            <label class="label" for="inv-dist">
                                <span class="label-text">"Distributed"</span>
                            </label>
                            <input
                                id="inv-dist"
                                type="number"
                                step="0.01"
                                min="0"
                                placeholder="0"
                                class="input input-bordered w-full"
                                prop:value=distributed
                                on:input=move |ev| set_distributed.set(event_target_value(&ev))
                            />
                        </div>
                    </div>
                    <div class="form-control">
                        <label class="label" for="inv-status">
                            <span class="label-text">"Status"</span>
                        </label>
                        <select
                            id="inv-status"
                            class="select select-bordered w-full"
                            on:change=move |ev| {
                                set_status.set(match event_target_value(&ev).as_str() {
                                    "Closed" => InvestmentStatus::Closed,
                                    "Pending" => InvestmentStatus::Pending,
                                    _ => InvestmentStatus::Active,
                                })
                            }
                        >
                            <option selected=move || status.get() == InvestmentStatus::Active>
                                "Active"
                            </option>
                            <option selected=move || status.get() == InvestmentStatus::Pending>
                                "Pending"
                            </option>
                            <option selected=move || status.get() == InvestmentStatus::Closed>
                                "Closed"
                            </option>
                        </select>
                    </div>
                    <Show when=move || form_error.get().is_some()>
                        <div role="alert" class="alert alert-error text-sm py-2">
                            <span>{move || form_error.get().unwrap_or_default()}</span>
                        </div>
                    </Show>
                    <div class="modal-action">
                        <button
                            type="button"
                            class="btn"
                            on:click=move |_| {
                                reset_form();
                                set_open.set(false);
                            }
                        >
                            "Cancel"
                        </button>
                        <button type="submit" class="btn btn-primary">"Save"</button>
                    </div>
                </form>
            </div>
            <form method="dialog" class="modal-backdrop">
                <button>"close"</button>
            </form>
        </dialog>
    }
}
