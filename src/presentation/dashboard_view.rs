// Text rendering of the stations table, pagination bar and chart series
use crate::application::stations_view_model::StationsViewModel;
use crate::domain::user::User;
use crate::domain::view_state::{Period, SortColumn};
use std::fmt;

const STATION_WIDTH: usize = 16;
const AVERAGE_WIDTH: usize = 10;

pub struct DashboardView<'a> {
    view_model: &'a StationsViewModel,
    user: &'a User,
}

impl<'a> DashboardView<'a> {
    pub fn new(view_model: &'a StationsViewModel, user: &'a User) -> Self {
        Self { view_model, user }
    }

    fn header_label(&self, column: SortColumn, title: &str) -> String {
        let view = self.view_model.view();
        if view.sort_column == column {
            format!("{} {}", title, view.sort_direction.arrow())
        } else {
            title.to_string()
        }
    }

    fn write_periods(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let current = self.view_model.view().period;
        let buttons: Vec<String> = Period::ALL
            .iter()
            .map(|p| {
                let label = p.as_str().to_uppercase();
                if *p == current {
                    format!("[{}]", label)
                } else {
                    format!(" {} ", label)
                }
            })
            .collect();
        writeln!(f, "{}", buttons.join(" "))
    }

    fn write_table(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rows = self.view_model.page_rows();
        if rows.clone().next().is_none() {
            return Ok(());
        }

        writeln!(
            f,
            "{:<sw$} | {:>aw$}",
            self.header_label(SortColumn::EquipmentId, "Station"),
            self.header_label(SortColumn::Average, "Average"),
            sw = STATION_WIDTH,
            aw = AVERAGE_WIDTH
        )?;
        writeln!(f, "{}", "-".repeat(STATION_WIDTH + AVERAGE_WIDTH + 3))?;
        for station in rows {
            writeln!(
                f,
                "{:<sw$} | {:>aw$}",
                station.equipment_id,
                station.display_average(),
                sw = STATION_WIDTH,
                aw = AVERAGE_WIDTH
            )?;
        }
        Ok(())
    }

    fn write_pagination(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let vm = self.view_model;
        let previous = if vm.has_previous_page() { "< Previous" } else { "  Previous" };
        let next = if vm.has_next_page() { "Next >" } else { "Next  " };
        writeln!(
            f,
            "{}   Page {} of {}   {}",
            previous,
            vm.view().page,
            vm.total_pages(),
            next
        )
    }

    fn write_chart(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Some(chart) = self.view_model.chart_series() else {
            return writeln!(f, "Select a station to view its data.");
        };

        writeln!(f, "{}", chart.title)?;
        if let Some(series) = self.view_model.selected()
            && series.values.is_empty()
        {
            writeln!(f, "  No samples for {} in this period.", series.equipment_id)?;
        }
        for point in &chart.points {
            writeln!(f, "  {}  {}", point.label, point.value)?;
        }
        Ok(())
    }
}

impl fmt::Display for DashboardView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Stations (signed in as {})", self.user.username)?;
        self.write_periods(f)?;

        if self.view_model.is_loading() {
            writeln!(f, "Loading...")?;
        }
        if let Some(error) = self.view_model.error() {
            writeln!(f, "Error: {}", error)?;
        }

        self.write_table(f)?;
        self.write_pagination(f)?;
        writeln!(f)?;
        self.write_chart(f)
    }
}
