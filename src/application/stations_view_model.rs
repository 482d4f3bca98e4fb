// Stations view-model - Table, pagination and chart state for the dashboard
use crate::application::sensor_api::{ApiError, SensorDataApi};
use crate::application::session::SessionProvider;
use crate::domain::station::{ChartSeries, StationAverage, StationSeries};
use crate::domain::view_state::{
    total_pages, Period, SortColumn, SortDirection, ViewState, PAGE_SIZE,
};
use std::cmp::Ordering;
use std::sync::Arc;

pub struct StationsViewModel {
    api: Arc<dyn SensorDataApi>,
    session: Arc<dyn SessionProvider>,
    stations: Vec<StationAverage>,
    selected: Option<StationSeries>,
    view: ViewState,
    loading: bool,
    error: Option<String>,
}

impl StationsViewModel {
    pub fn new(api: Arc<dyn SensorDataApi>, session: Arc<dyn SessionProvider>) -> Self {
        Self {
            api,
            session,
            stations: Vec::new(),
            selected: None,
            view: ViewState::default(),
            loading: false,
            error: None,
        }
    }

    pub fn view(&self) -> &ViewState {
        &self.view
    }

    pub fn stations(&self) -> &[StationAverage] {
        &self.stations
    }

    pub fn selected(&self) -> Option<&StationSeries> {
        self.selected.as_ref()
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Initial load for the current period
    pub async fn refresh(&mut self) {
        self.set_period(self.view.period).await;
    }

    /// Fetch averages for `period`. The list, page and period are only
    /// replaced when the fetch succeeds.
    pub async fn set_period(&mut self, period: Period) {
        self.begin_fetch();
        let result = match self.session.get_token() {
            Some(token) => self.api.fetch_averages(&token, period).await,
            None => Err(ApiError::Unauthenticated),
        };
        self.loading = false;

        match result {
            Ok(stations) => {
                tracing::info!("Loaded {} stations for period {}", stations.len(), period);
                self.stations = stations;
                self.view.period = period;
                self.view.page = 1;
            }
            Err(e) => self.fail("averages", e),
        }
    }

    pub async fn select_station(&mut self, equipment_id: &str) {
        self.begin_fetch();
        let period = self.view.period;
        let result = match self.session.get_token() {
            Some(token) => {
                self.api
                    .fetch_station_series(&token, equipment_id, period)
                    .await
            }
            None => Err(ApiError::Unauthenticated),
        };
        self.loading = false;

        match result {
            Ok(series) => {
                tracing::info!(
                    "Loaded {} samples for station {} ({})",
                    series.values.len(),
                    equipment_id,
                    period
                );
                self.selected = Some(series);
            }
            Err(e) => self.fail("station series", e),
        }
    }

    pub fn set_sort(&mut self, column: SortColumn) {
        if self.view.sort_column == column {
            self.view.sort_direction = self.view.sort_direction.flipped();
        } else {
            self.view.sort_column = column;
            self.view.sort_direction = SortDirection::Asc;
        }
        self.view.page = 1;
    }

    /// Out-of-range pages are ignored
    pub fn set_page(&mut self, page: usize) {
        if page < 1 || page > self.total_pages() {
            tracing::debug!("Ignoring page {} (total {})", page, self.total_pages());
            return;
        }
        self.view.page = page;
    }

    pub fn total_pages(&self) -> usize {
        total_pages(self.stations.len())
    }

    pub fn has_previous_page(&self) -> bool {
        self.view.page > 1
    }

    pub fn has_next_page(&self) -> bool {
        self.view.page < self.total_pages()
    }

    /// All stations ordered by the active column. Ties keep fetch order.
    pub fn sorted_rows(&self) -> impl Iterator<Item = &StationAverage> + Clone + '_ {
        let column = self.view.sort_column;
        let direction = self.view.sort_direction;

        let mut order: Vec<usize> = (0..self.stations.len()).collect();
        order.sort_by(|&a, &b| {
            let ordering = compare_by(column, &self.stations[a], &self.stations[b]);
            match direction {
                SortDirection::Asc => ordering,
                SortDirection::Desc => ordering.reverse(),
            }
        });

        order.into_iter().map(move |i| &self.stations[i])
    }

    pub fn page_rows(&self) -> impl Iterator<Item = &StationAverage> + Clone + '_ {
        let start = (self.view.page - 1) * PAGE_SIZE;
        self.sorted_rows().skip(start).take(PAGE_SIZE)
    }

    pub fn chart_series(&self) -> Option<ChartSeries> {
        self.selected.as_ref().map(ChartSeries::from_series)
    }

    fn begin_fetch(&mut self) {
        self.loading = true;
        self.error = None;
    }

    fn fail(&mut self, what: &str, error: ApiError) {
        tracing::error!("Error fetching {}: {}", what, error);
        self.error = Some(error.to_string());
    }
}

/// Absent averages sort below every number
fn compare_by(column: SortColumn, a: &StationAverage, b: &StationAverage) -> Ordering {
    match column {
        SortColumn::EquipmentId => a.equipment_id.cmp(&b.equipment_id),
        SortColumn::Average => match (a.average, b.average) {
            (None, None) => Ordering::Equal,
            (None, Some(_)) => Ordering::Less,
            (Some(_), None) => Ordering::Greater,
            (Some(x), Some(y)) => x.total_cmp(&y),
        },
    }
}
