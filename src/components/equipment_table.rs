use equiviz_core::format::fixed2;
use equiviz_core::Equipment;
use leptos::prelude::*;

#[component]
pub fn EquipmentTable(equipment: Vec<Equipment>) -> impl IntoView {
    view! {
        <div class="table-container">
            <h3>"Equipment Details"</h3>
            <table>
                <thead>
                    <tr>
                        <th>"Equipment Name"</th>
                        <th>"Type"</th>
                        <th>"Flowrate"</th>
                        <th>"Pressure"</th>
                        <th>"Temperature"</th>
                    </tr>
                </thead>
                <tbody>
                    {equipment
                        .into_iter()
                        .map(|eq| {
                            view! {
                                <tr>
                                    <td>{eq.equipment_name}</td>
                                    <td>{eq.equipment_type}</td>
                                    <td>{fixed2(eq.flowrate)}</td>
                                    <td>{fixed2(eq.pressure)}</td>
                                    <td>{fixed2(eq.temperature)}</td>
                                </tr>
                            }
                        })
                        .collect::<Vec<_>>()}
                </tbody>
            </table>
        </div>
    }
}
