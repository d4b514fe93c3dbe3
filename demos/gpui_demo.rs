#[cfg(feature = "gpui")]
use std::time::Duration;

#[cfg(feature = "gpui")]
use gpui::{
    App, AppContext, Application, Bounds, Context, Entity, IntoElement, ParentElement, Render,
    Styled, Window, WindowBounds, WindowOptions, div, px, size,
};

#[cfg(feature = "gpui")]
use gpui_barplot::{
    Aggregator, BarStyle, CategoryCatalog, CategoryRecord, GpuiChartView, MetricChart,
    RawCategoryCount, Theme, count_by_category,
};

#[cfg(feature = "gpui")]
struct Dashboard {
    interest: Entity<GpuiChartView>,
    companies: Entity<GpuiChartView>,
}

#[cfg(feature = "gpui")]
impl Render for Dashboard {
    fn render(&mut self, _window: &mut Window, _cx: &mut Context<Self>) -> impl IntoElement {
        div()
            .size_full()
            .flex()
            .flex_col()
            .child(div().h(px(300.0)).w_full().child(self.interest.clone()))
            .child(div().h(px(300.0)).w_full().child(self.companies.clone()))
    }
}

#[cfg(feature = "gpui")]
fn seed_companies() -> Vec<CategoryRecord> {
    [
        ("네이버", "프론트엔드"),
        ("카카오", "백엔드"),
        ("라인", "풀스택"),
        ("쿠팡", "UI/UX"),
        ("당근마켓", "데이터 분석"),
        ("토스", "프론트엔드"),
    ]
    .into_iter()
    .map(|(name, category)| CategoryRecord::new(name, category))
    .collect()
}

#[cfg(feature = "gpui")]
fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    Application::new().run(|cx: &mut App| {
        let options = WindowOptions {
            window_bounds: Some(WindowBounds::Windowed(Bounds::centered(
                None,
                size(px(720.0), px(640.0)),
                cx,
            ))),
            ..Default::default()
        };

        cx.open_window(options, |_window, cx| {
            let catalog = CategoryCatalog::job_categories();
            let mut companies = seed_companies();

            let mut interest_chart = MetricChart::builder()
                .theme(Theme::dark().with_bars(BarStyle::horizontal().with_legend()))
                .build();
            let counts: Vec<RawCategoryCount> = count_by_category(&companies, &catalog);
            interest_chart.set_values(&catalog.branded_values(&counts));

            let mut company_chart = MetricChart::builder()
                .theme(Theme::dark())
                .aggregator(Aggregator::new().with_catalog(catalog.clone()))
                .build();
            company_chart.set_records(&companies);

            let interest_view = GpuiChartView::new(interest_chart);
            let company_view = GpuiChartView::new(company_chart);
            let interest_handle = interest_view.chart_handle();
            let company_handle = company_view.chart_handle();
            let interest = cx.new(|_| interest_view);
            let company_entity = cx.new(|_| company_view);

            let interest_for_task = interest.clone();
            let companies_for_task = company_entity.clone();
            cx.spawn(async move |cx| {
                let arrivals = ["AI/ML", "백엔드", "DevOps", "백엔드", "모바일 앱"];
                for (index, category) in arrivals.iter().cycle().enumerate() {
                    cx.background_executor()
                        .timer(Duration::from_secs(3))
                        .await;
                    companies.push(CategoryRecord::new(format!("company {index}"), *category));
                    let counts = count_by_category(&companies, &catalog);
                    let values = catalog.branded_values(&counts);
                    let updated = cx.update(|cx| {
                        interest_handle.write(|chart| chart.set_values(&values));
                        company_handle.write(|chart| chart.set_records(&companies));
                        interest_for_task.update(cx, |_, cx| cx.notify());
                        companies_for_task.update(cx, |_, cx| cx.notify());
                    });
                    if updated.is_err() {
                        break;
                    }
                }
            })
            .detach();

            cx.new(|_| Dashboard {
                interest,
                companies: company_entity,
            })
        })
        .expect("open demo window");
    });
}

#[cfg(not(feature = "gpui"))]
fn main() {
    eprintln!("Enable the gpui feature to run this example.");
}
