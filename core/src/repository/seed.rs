use std::collections::BTreeMap;

use chrono::NaiveDate;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::model::advisor::{AdvisorPerformance, AdvisorRevenueRecord, RevenueItem};
use crate::model::complaint::{ComplaintRecord, ComplaintStatus, Priority, PsfComplaintCounts};
use crate::model::csi::{KpiEntry, KpiUnit, TargetDirection, YearlyKpiDataset};
use crate::model::dataset::{Dataset, PartialPeriod};
use crate::model::metrics::{MetricKey, MetricValues, MonthlyMetricRecord, YearlyMetricSet};
use crate::model::month::Month;
use crate::service::percent::round2;

const VARIANCE_SEED: u64 = 0x5eed_2025;

// mech RO, bp RO, mech parts, bp parts, mech labour, bp labour, mech acc, bp acc
type MetricRow = (Month, [f64; 8]);

const METRICS_2024: [MetricRow; 12] = [
    (Month::Jan, [1332.0, 188.0, 9199120.52, 7446075.89, 3257269.01, 3113276.39, 327749.93, 32888.89]),
    (Month::Feb, [1313.0, 184.0, 10561098.49, 5636478.31, 3517083.09, 3008850.54, 427059.69, 50496.07]),
    (Month::Mar, [1365.0, 223.0, 10365808.91, 5715215.76, 3506224.06, 3626249.17, 511253.44, 34827.13]),
    (Month::Apr, [1529.0, 235.0, 9136294.45, 6319660.29, 3042362.72, 3164060.64, 345728.97, 39095.21]),
    (Month::May, [1463.0, 232.0, 9073501.27, 5927629.2, 2812102.37, 3219729.58, 364667.32, 37704.87]),
    (Month::Jun, [1432.0, 231.0, 8231121.68, 5084647.89, 2347254.97, 3055002.26, 406104.42, 37365.84]),
    (Month::Jul, [1654.0, 231.0, 9303522.28, 6471173.71, 3343117.28, 3474281.85, 449553.36, 47747.41]),
    (Month::Aug, [1431.0, 221.0, 9046775.45, 8243318.43, 2767793.54, 3258581.2, 346174.04, 13453.97]),
    (Month::Sep, [1370.0, 225.0, 8908458.51, 8929754.93, 2833545.4, 3026740.75, 425494.95, 36894.49]),
    (Month::Oct, [1179.0, 179.0, 9338933.25, 10368978.37, 2706922.04, 3034276.10, 261162.72, 21995.45]),
    (Month::Nov, [1252.0, 172.0, 8500568.24, 11472235.44, 3538918.42, 4379346.68, 310310.43, 19382.26]),
    (Month::Dec, [1301.0, 184.0, 9061814.96, 7719658.78, 3934073.89, 3159950.70, 299253.79, 38911.13]),
];

const METRICS_2025: [MetricRow; 6] = [
    (Month::Jan, [1134.0, 146.0, 8102953.73, 4082508.61, 3088027.81, 2961587.96, 761959.10, 16603.51]),
    (Month::Feb, [1124.0, 160.0, 6841547.65, 6430476.10, 3054913.0, 2733546.91, 631010.05, 13392.53]),
    (Month::Mar, [1020.0, 154.0, 7869538.93, 5390384.06, 3172735.37, 2644326.49, 463970.67, 25379.86]),
    (Month::Apr, [1123.0, 175.0, 8009736.18, 6219482.74, 2878102.25, 2687707.73, 569699.84, 45918.77]),
    (Month::May, [1203.0, 170.0, 8502135.07, 7943871.79, 3069465.77, 2613419.36, 702321.0, 6258.85]),
    (Month::Jun, [604.0, 59.0, 4466286.18, 2635120.19, 1549744.48, 965801.76, 269941.11, 9990.0]),
];

fn metric_set(year: i32, rows: &[MetricRow]) -> YearlyMetricSet {
    let months = rows
        .iter()
        .map(|&(month, v)| {
            MonthlyMetricRecord::new(
                month,
                MetricValues {
                    mech_ro: v[0],
                    bp_ro: v[1],
                    mech_parts: v[2],
                    bp_parts: v[3],
                    mech_labour: v[4],
                    bp_labour: v[5],
                    mech_accessories: v[6],
                    bp_accessories: v[7],
                },
            )
        })
        .collect();
    YearlyMetricSet::new(year, months)
}

struct AdvisorSeed {
    name: &'static str,
    throughput: u32,
    vas: f64,
    labour: f64,
    accessories: f64,
    lubricant: f64,
    battery: f64,
    tyre: f64,
    parts: f64,
    brake_pad: f64,
    wiper_blade: f64,
    wheel_alignment_nos: f64,
    washer_fluid_nos: f64,
    rsa_nos: f64,
    ew_nos: f64,
}

static ADVISORS: [AdvisorSeed; 10] = [
    AdvisorSeed { name: "Ajay Kumar", throughput: 353, vas: 8090.0, labour: 39759.35, accessories: 7651.05, lubricant: 20435.47, battery: 539047.01, tyre: 0.0, parts: 205895.18, brake_pad: 9866.4, wiper_blade: 0.0, wheel_alignment_nos: 7.0, washer_fluid_nos: 4.0, rsa_nos: 0.0, ew_nos: 0.0 },
    AdvisorSeed { name: "Dhanesh Tripathi", throughput: 68, vas: 110874.0, labour: 120922.5, accessories: 17942.32, lubricant: 77928.73, battery: 36291.4, tyre: 14864.06, parts: 562941.31, brake_pad: 35436.7, wiper_blade: 0.0, wheel_alignment_nos: 58.0, washer_fluid_nos: 35.0, rsa_nos: 0.0, ew_nos: 0.0 },
    AdvisorSeed { name: "Yashvir Singh Aswal", throughput: 109, vas: 168276.0, labour: 197738.88, accessories: 55389.6, lubricant: 95652.81, battery: 31267.52, tyre: 0.0, parts: 550651.21, brake_pad: 69442.15, wiper_blade: 0.0, wheel_alignment_nos: 62.0, washer_fluid_nos: 71.0, rsa_nos: 0.0, ew_nos: 0.0 },
    AdvisorSeed { name: "Vikram", throughput: 69, vas: 153870.0, labour: 105917.15, accessories: 23764.81, lubricant: 79781.71, battery: 944.29, tyre: 12924.22, parts: 317205.54, brake_pad: 43871.85, wiper_blade: 0.0, wheel_alignment_nos: 41.0, washer_fluid_nos: 47.0, rsa_nos: 0.0, ew_nos: 0.0 },
    AdvisorSeed { name: "Nikhil Kumar", throughput: 111, vas: 92489.0, labour: 93945.0, accessories: 10816.23, lubricant: 13560.0, battery: 37853.39, tyre: 0.0, parts: 614322.74, brake_pad: 0.0, wiper_blade: 0.0, wheel_alignment_nos: 0.0, washer_fluid_nos: 73.0, rsa_nos: 0.0, ew_nos: 0.0 },
    AdvisorSeed { name: "Rahul Sharma", throughput: 143, vas: 128765.0, labour: 154390.22, accessories: 32871.45, lubricant: 87342.18, battery: 28761.33, tyre: 21543.87, parts: 478932.11, brake_pad: 52871.32, wiper_blade: 12.0, wheel_alignment_nos: 38.0, washer_fluid_nos: 52.0, rsa_nos: 8.0, ew_nos: 5.0 },
    AdvisorSeed { name: "Amit Singh", throughput: 165, vas: 187432.0, labour: 178954.37, accessories: 43982.76, lubricant: 98743.21, battery: 54321.98, tyre: 32198.45, parts: 527834.23, brake_pad: 67892.45, wiper_blade: 18.0, wheel_alignment_nos: 45.0, washer_fluid_nos: 64.0, rsa_nos: 12.0, ew_nos: 9.0 },
    AdvisorSeed { name: "Priya Patel", throughput: 128, vas: 142387.0, labour: 132786.54, accessories: 29876.32, lubricant: 76543.21, battery: 42198.76, tyre: 18765.43, parts: 423876.54, brake_pad: 48765.32, wiper_blade: 9.0, wheel_alignment_nos: 32.0, washer_fluid_nos: 47.0, rsa_nos: 6.0, ew_nos: 4.0 },
    AdvisorSeed { name: "Sanjay Gupta", throughput: 187, vas: 198765.0, labour: 198732.65, accessories: 47832.18, lubricant: 103298.76, battery: 64321.87, tyre: 37654.21, parts: 587654.32, brake_pad: 72143.87, wiper_blade: 21.0, wheel_alignment_nos: 49.0, washer_fluid_nos: 73.0, rsa_nos: 15.0, ew_nos: 11.0 },
    AdvisorSeed { name: "Deepak Verma", throughput: 103, vas: 112398.0, labour: 121876.43, accessories: 24321.87, lubricant: 65432.18, battery: 32198.76, tyre: 14321.65, parts: 387654.32, brake_pad: 39876.54, wiper_blade: 7.0, wheel_alignment_nos: 28.0, washer_fluid_nos: 39.0, rsa_nos: 5.0, ew_nos: 3.0 },
];

/// Advisor figures are recorded for June; earlier months are the June
/// figures scaled by the workshop's monthly load.
const ADVISOR_MONTH_SCALE: [(Month, f64); 6] = [
    (Month::Jan, 0.94),
    (Month::Feb, 0.89),
    (Month::Mar, 0.97),
    (Month::Apr, 1.02),
    (Month::May, 1.08),
    (Month::Jun, 1.0),
];

fn advisor_record(seed: &AdvisorSeed, year: i32, month: Month, scale: f64) -> AdvisorRevenueRecord {
    let money = |value: f64| round2(value * scale);
    let throughput = (seed.throughput as f64 * scale).round() as u32;
    AdvisorRevenueRecord::new(seed.name, year, month, throughput)
        .with_item(RevenueItem::Vas.label(), money(seed.vas))
        .with_item(RevenueItem::Labour.label(), money(seed.labour))
        .with_item(RevenueItem::Accessories.label(), money(seed.accessories))
        .with_item(RevenueItem::Lubricant.label(), money(seed.lubricant))
        .with_item(RevenueItem::Battery.label(), money(seed.battery))
        .with_item(RevenueItem::Tyre.label(), money(seed.tyre))
        .with_item(RevenueItem::Parts.label(), money(seed.parts))
        .with_item(RevenueItem::BrakePad.label(), money(seed.brake_pad))
        .with_item(RevenueItem::WiperBlade.label(), money(seed.wiper_blade))
        .with_item("Wheel Alignment (Nos)", seed.wheel_alignment_nos)
        .with_item("Washer Fluid (Nos)", seed.washer_fluid_nos)
        .with_item("RSA (Nos)", seed.rsa_nos)
        .with_item("EW (Nos)", seed.ew_nos)
}

fn advisor_records() -> Vec<AdvisorRevenueRecord> {
    ADVISOR_MONTH_SCALE
        .iter()
        .flat_map(|&(month, scale)| {
            ADVISORS
                .iter()
                .map(move |seed| advisor_record(seed, 2025, month, scale))
        })
        .collect()
}

// id, type, status, customer, vehicle, description, reported, advisor, priority, resolution
type ComplaintRow = (
    &'static str,
    &'static str,
    ComplaintStatus,
    &'static str,
    &'static str,
    &'static str,
    (i32, u32, u32),
    &'static str,
    Priority,
    Option<(&'static str, (i32, u32, u32))>,
);

const COMPLAINTS: [ComplaintRow; 10] = [
    ("PSF-2025-001", "Service Quality", ComplaintStatus::Closed, "Rajesh Kumar", "MG Hector (MH01AB1234)", "Customer reported engine noise after service", (2025, 1, 5), "Ajay Kumar", Priority::High, Some(("Engine mount replaced under warranty", (2025, 1, 7)))),
    ("PSF-2025-002", "Staff Behavior", ComplaintStatus::Closed, "Priya Singh", "MG ZS EV (DL05CD5678)", "Customer complained about rude behavior from service staff", (2025, 1, 12), "Dhanesh Tripathi", Priority::Medium, Some(("Staff counseled and customer offered complimentary service", (2025, 1, 14)))),
    ("PSF-2025-003", "Delivery Delay", ComplaintStatus::Closed, "Amit Sharma", "MG Astor (UP16EF9012)", "Vehicle delivery delayed by 2 days", (2025, 1, 18), "Yashvir Singh Aswal", Priority::Medium, Some(("Customer compensated with free accessories", (2025, 1, 19)))),
    ("PSF-2025-004", "Billing Issue", ComplaintStatus::Closed, "Neha Gupta", "MG Gloster (HR26GH3456)", "Customer billed for parts not replaced", (2025, 1, 25), "Vikram", Priority::High, Some(("Bill corrected and customer refunded", (2025, 1, 26)))),
    ("PSF-2025-005", "Service Quality", ComplaintStatus::Pending, "Rahul Verma", "MG Hector Plus (KA01IJ7890)", "AC not cooling properly after service", (2025, 2, 3), "Nikhil Kumar", Priority::Medium, None),
    ("PSF-2025-006", "Parts Availability", ComplaintStatus::Closed, "Smita Patel", "MG ZS EV (GJ05KL1234)", "Customer waiting for brake pads for 1 week", (2025, 2, 10), "Ajay Kumar", Priority::High, Some(("Parts expedited and fitted with complimentary wheel alignment", (2025, 2, 12)))),
    ("PSF-2025-007", "Cleanliness", ComplaintStatus::Closed, "Vikram Singh", "MG Astor (PB10MN5678)", "Vehicle returned with interior stains", (2025, 2, 15), "Dhanesh Tripathi", Priority::Low, Some(("Complimentary interior cleaning provided", (2025, 2, 16)))),
    ("PSF-2025-008", "Service Quality", ComplaintStatus::Pending, "Sanjay Kapoor", "MG Hector (TN07OP9012)", "Steering wheel vibration after wheel balancing", (2025, 2, 22), "Yashvir Singh Aswal", Priority::Medium, None),
    ("PSF-2025-009", "Appointment", ComplaintStatus::Closed, "Anjali Mathur", "MG ZS EV (MP09QR3456)", "Customer appointment rescheduled without notice", (2025, 2, 28), "Vikram", Priority::Low, Some(("Pickup and drop service offered as compensation", (2025, 3, 1)))),
    ("PSF-2025-010", "Billing Issue", ComplaintStatus::Pending, "Deepak Sharma", "MG Gloster (RJ11ST7890)", "Warranty claim rejected incorrectly", (2025, 3, 5), "Nikhil Kumar", Priority::High, None),
];

fn date((y, m, d): (i32, u32, u32)) -> NaiveDate {
    // Seed dates are literal calendar dates.
    NaiveDate::from_ymd_opt(y, m, d).unwrap_or(NaiveDate::MIN)
}

fn complaints() -> Vec<ComplaintRecord> {
    COMPLAINTS
        .iter()
        .map(|&(id, kind, status, customer, vehicle, description, reported, advisor, priority, resolution)| {
            ComplaintRecord {
                id: id.to_string(),
                complaint_type: kind.to_string(),
                status,
                priority,
                customer: customer.to_string(),
                vehicle: vehicle.to_string(),
                description: description.to_string(),
                service_advisor: advisor.to_string(),
                reported: date(reported),
                resolved: resolution.map(|(_, d)| date(d)),
                resolution: resolution.map(|(text, _)| text.to_string()),
            }
        })
        .collect()
}

// name, rsa, ew, wheel alignment, balancing, upselling %, satisfaction %
const PERFORMANCE: [(&str, u32, u32, u32, u32, f64, f64); 8] = [
    ("Ajay Kumar", 8, 5, 32, 28, 72.0, 87.0),
    ("Dhanesh Tripathi", 12, 9, 58, 45, 85.0, 92.0),
    ("Yashvir Singh Aswal", 15, 11, 62, 54, 90.0, 94.0),
    ("Vikram", 7, 4, 41, 37, 68.0, 85.0),
    ("Nikhil Kumar", 5, 3, 28, 22, 65.0, 82.0),
    ("Rahul Sharma", 10, 7, 45, 40, 78.0, 88.0),
    ("Amit Singh", 14, 10, 52, 48, 82.0, 90.0),
    ("Priya Patel", 9, 6, 38, 35, 75.0, 86.0),
];

fn advisor_performance() -> Vec<AdvisorPerformance> {
    PERFORMANCE
        .iter()
        .map(|&(name, rsa, ew, wheel_alignment, balancing, upselling, customer_satisfaction)| {
            AdvisorPerformance {
                name: name.to_string(),
                rsa,
                ew,
                wheel_alignment,
                balancing,
                upselling,
                customer_satisfaction,
            }
        })
        .collect()
}

const PSF_TYPES: [&str; 5] = ["Service Quality", "Billing Issue", "Appointment", "Cleanliness", "Delay in Delivery"];

// Counts in PSF_TYPES order.
const PSF_COUNTS: [(Month, &str, [u32; 5]); 12] = [
    (Month::Jan, "Ajay Kumar", [2, 0, 1, 0, 1]),
    (Month::Jan, "Vikram", [1, 1, 0, 0, 0]),
    (Month::Feb, "Ajay Kumar", [1, 0, 0, 1, 0]),
    (Month::Feb, "Yashvir Singh Aswal", [1, 0, 0, 0, 0]),
    (Month::Feb, "Vikram", [0, 0, 2, 0, 1]),
    (Month::Mar, "Nikhil Kumar", [0, 2, 0, 0, 0]),
    (Month::Mar, "Ajay Kumar", [1, 0, 0, 0, 2]),
    (Month::Apr, "Vikram", [2, 0, 0, 1, 0]),
    (Month::Apr, "Deepak Verma", [0, 1, 1, 0, 0]),
    (Month::May, "Nikhil Kumar", [1, 0, 0, 0, 1]),
    (Month::May, "Ajay Kumar", [0, 0, 1, 0, 0]),
    (Month::Jun, "Yashvir Singh Aswal", [1, 1, 0, 0, 0]),
];

fn psf_complaints() -> Vec<PsfComplaintCounts> {
    PSF_COUNTS
        .iter()
        .map(|(month, advisor, counts)| {
            PSF_TYPES
                .iter()
                .zip(counts)
                .fold(PsfComplaintCounts::new(advisor, 2025, *month), |record, (kind, &count)| {
                    record.with_count(kind, count)
                })
        })
        .collect()
}

fn kpis_2024() -> YearlyKpiDataset {
    use KpiUnit::*;
    let kpis = vec![
        KpiEntry::new("CSI", "(Tgt >=875)", Score)
            .with_values(&[871.0, 839.0, 840.0, 813.0, 763.0, 773.0, 808.0, 769.0, 776.0, 802.0, 818.0, 822.0])
            .with_ytd(807.83),
        KpiEntry::new("MG NPS", "(Tgt >=70)", Score)
            .with_values(&[65.0, 75.0, 63.0, 62.0, 45.0, 48.0, 64.0, 50.0, 53.0, 53.0, 55.0, 64.0])
            .with_ytd(58.08),
        KpiEntry::new("Dealer NPS", "(Tgt >=70)", Score)
            .with_values(&[77.0, 58.0, 63.0, 57.0, 43.0, 47.0, 52.0, 44.0, 42.0, 58.0, 58.0, 58.0])
            .with_ytd(54.75),
        KpiEntry::new("Service Advisor", "(Tgt >=850)", Score)
            .with_values(&[869.0, 853.0, 854.0, 807.0, 761.0, 765.0, 817.0, 777.0, 783.0, 797.0, 813.0, 819.0])
            .with_ytd(809.58),
        KpiEntry::new("Handover and delivery", "(Tgt >=850)", Score)
            .with_values(&[881.0, 849.0, 866.0, 855.0, 822.0, 833.0, 849.0, 831.0, 817.0, 845.0, 844.0, 837.0])
            .with_ytd(844.08),
        KpiEntry::new("Fix Right First Time", "(Tgt >=90%)", Percentage)
            .with_values(&[88.0, 88.0, 88.0, 84.0, 79.0, 79.0, 83.0, 79.0, 83.0, 80.0, 88.0, 90.0])
            .with_ytd(84.08),
        KpiEntry::new("Washing Quality", "(Tgt >=850)", Score)
            .with_values(&[831.0, 829.0, 791.0, 776.0, 791.0, 803.0, 809.0, 791.0, 834.0, 833.0, 822.0, 811.0])
            .with_ytd(810.08),
        KpiEntry::new("No. of concerns escalated", "", Count)
            .with_values(&[30.0, 33.0, 44.0, 32.0, 67.0, 35.0, 32.0, 64.0, 84.0, 60.0, 24.0, 21.0])
            .with_ytd(526.0),
        KpiEntry::new("CCPTV (CC/1000 Vehicles)", "(Tgt =32)", Score)
            .with_direction(TargetDirection::LowerIsBetter)
            .with_values(&[21.0, 23.0, 29.0, 22.0, 46.0, 25.0, 26.0, 28.0, 58.0, 48.0, 18.0, 16.0])
            .with_ytd(360.0),
        KpiEntry::new("CCR% <= 3 days (Mech)", "(Tgt > 90%)", Percentage)
            .with_values(&[100.0, 90.0, 80.0, 79.0, 87.0, 67.0, 64.0, 90.0, 73.0, 77.0, 57.0, 73.0])
            .with_ytd(78.08),
        KpiEntry::new("CCR% <= 7 days (BP)", "(Tgt > 90%)", Percentage)
            .with_values(&[86.0, 100.0, 75.0, 56.0, 93.0, 100.0, 88.0, 100.0, 90.0, 92.0, 20.0, 80.0])
            .with_ytd(81.67),
        KpiEntry::new("3rd Day PSF Contact %age", "(Tgt > 90%)", Percentage)
            .with_values(&[80.0, 81.0, 81.0, 71.0, 83.0, 74.0, 81.0, 72.0, 72.0, 68.0, 75.0, 74.0])
            .with_ytd(76.0),
        KpiEntry::new("Mech RO ageing > 3 days", "(Tgt < 2%)", Percentage)
            .with_values(&[2.2, 3.4, 4.6, 2.2, 3.0, 8.72, 5.49, 7.02, 6.91, 8.43, 6.98, 6.09])
            .with_ytd(5.42),
        KpiEntry::new("BP RO ageing > 15 days", "(Tgt < 10%)", Percentage)
            .with_values(&[8.5, 4.9, 8.1, 9.7, 8.0, 10.68, 10.82, 20.27, 20.44, 20.56, 20.81, 17.74])
            .with_ytd(13.38),
        KpiEntry::new("Same Day Delivery", "(Tgt > 90%)", Percentage)
            .with_values(&[86.0, 82.0, 78.0, 86.0, 80.0, 74.0, 78.0, 72.0, 72.0, 73.0, 76.0, 76.0])
            .with_ytd(77.75),
        KpiEntry::new("BP RO TAT", "(Tgt <= 8days)", Days)
            .with_values(&[8.4, 6.6, 8.2, 8.4, 8.7, 8.9, 8.5, 11.1, 11.9, 13.9, 16.3, 12.8])
            .with_ytd(10.31),
        KpiEntry::new("Warranty Claim Submission within 5 Days", "5 Days", Days)
            .with_values(&[0.57, 0.67, 0.68, 0.83, 0.7, 0.87, 0.76, 0.73, 0.85, 0.91, 0.86, 0.91])
            .with_ytd(0.78),
    ];
    YearlyKpiDataset { year: 2024, kpis }
}

fn kpis_2025() -> YearlyKpiDataset {
    use KpiUnit::*;
    // The survey export zero-fills months that have not been reported yet.
    let pad = |reported: [f64; 5]| {
        let mut values = [0.0; 12];
        values[..5].copy_from_slice(&reported);
        values
    };
    let kpis = vec![
        KpiEntry::new("CSI", "(Tgt >=875)", Score)
            .with_values(&pad([884.0, 873.0, 867.0, 844.0, 859.0]))
            .with_ytd(842.2),
        KpiEntry::new("MG NPS", "(Tgt >=70)", Score)
            .with_values(&pad([71.0, 68.0, 40.0, 65.0, 63.0]))
            .with_ytd(61.4),
        KpiEntry::new("Dealer NPS", "(Tgt >=70)", Score)
            .with_values(&pad([76.0, 69.0, 20.0, 64.0, 84.0]))
            .with_ytd(62.6),
        KpiEntry::new("Service Advisor", "(Tgt >=850)", Score)
            .with_values(&pad([865.0, 866.0, 720.0, 817.0, 874.0]))
            .with_ytd(828.4),
        KpiEntry::new("Handover and delivery", "(Tgt >=850)", Score)
            .with_values(&pad([866.0, 858.0, 760.0, 844.0, 874.0]))
            .with_ytd(840.4),
        KpiEntry::new("SOP- Work & Charges explained", "", Score)
            .with_values(&pad([96.0, 99.0, 100.0, 94.0, 78.0]))
            .with_ytd(93.4),
        KpiEntry::new("SOP- Fix Right First Time", "", Score)
            .with_values(&pad([87.0, 85.0, 80.0, 94.0, 78.0]))
            .with_ytd(84.8),
        KpiEntry::new("No. of concerns escalated", "", Count)
            .with_values(&pad([26.0, 32.0, 30.0, 34.0, 34.0]))
            .with_ytd(156.0),
        KpiEntry::new("CCPTV (CC/1000 Vehicles)", "(Tgt =27)", Score)
            .with_direction(TargetDirection::LowerIsBetter)
            .with_values(&pad([25.0, 25.0, 27.0, 28.84, 26.44]))
            .with_ytd(26.46),
        KpiEntry::new("CCR% <= 3 days (Mech)", "(Tgt > 90%)", Percentage)
            .with_values(&pad([89.0, 74.0, 77.0, 50.0, 37.0]))
            .with_ytd(65.4),
        KpiEntry::new("CCR% <= 7 days (BP)", "(Tgt > 90%)", Percentage)
            .with_values(&pad([50.0, 86.0, 71.0, 20.0, 70.0]))
            .with_ytd(59.4),
        KpiEntry::new("3rd Day PSF Contact %age", "(Tgt > 90%)", Percentage)
            .with_values(&pad([73.0, 80.0, 75.0, 82.0, 68.0]))
            .with_ytd(75.6),
        KpiEntry::new("Mech RO ageing > 3 days", "(Tgt < 2%)", Percentage)
            .with_values(&pad([4.9, 5.4, 6.86, 8.19, 8.23]))
            .with_ytd(6.72),
        KpiEntry::new("BP RO ageing > 15 days", "(Tgt < 10%)", Percentage)
            .with_values(&pad([7.43, 12.88, 9.62, 12.0, 10.59]))
            .with_ytd(10.5),
        KpiEntry::new("Same Day Delivery", "(Tgt > 90%)", Percentage)
            .with_values(&pad([79.0, 84.0, 78.0, 75.0, 76.0]))
            .with_ytd(78.4),
        KpiEntry::new("BP RO TAT", "(Tgt <= 8days)", Days)
            .with_values(&pad([8.5, 9.9, 8.0, 8.0, 11.0]))
            .with_ytd(9.08),
        KpiEntry::new("Warranty Claim Submission within 5 Days", "5 Days", Days)
            .with_values(&pad([0.89, 0.96, 0.88, 0.99, 0.99]))
            .with_ytd(0.94),
    ];
    YearlyKpiDataset { year: 2025, kpis }
}

/// Splits `total` into `days` plausible daily values: each day but the last
/// varies up to ±20% around the average and takes at most half of what is
/// left, and the last day takes the remainder. Values are rounded to two
/// decimals, so they add up to `total` only within rounding.
///
/// Illustrative data only. Projections never read from the generator.
pub fn spread_daily_actuals<R: Rng + ?Sized>(total: f64, days: u32, rng: &mut R) -> Vec<f64> {
    if days == 0 {
        return Vec::new();
    }
    let average = total / days as f64;
    let mut remaining = total;
    let mut actuals = Vec::with_capacity(days as usize);
    for _ in 1..days {
        let variance = rng.gen_range(-0.2..0.2);
        let daily = (average * (1.0 + variance)).max(0.0).min(remaining * 0.5);
        actuals.push(round2(daily));
        remaining -= daily;
    }
    actuals.push(round2(remaining));
    actuals
}

fn june_partial_period() -> PartialPeriod {
    let so_far = MetricValues {
        mech_ro: 320.0,
        bp_ro: 26.0,
        mech_parts: 2269312.12,
        bp_parts: 645376.54,
        mech_labour: 751499.03,
        bp_labour: 345285.38,
        ..MetricValues::ZERO
    };
    let elapsed_days = 14;

    let mut rng = StdRng::seed_from_u64(VARIANCE_SEED);
    let daily_actuals: BTreeMap<MetricKey, Vec<f64>> = [
        MetricKey::MechRo,
        MetricKey::BpRo,
        MetricKey::PartsRevenue,
        MetricKey::LabourRevenue,
    ]
    .iter()
    .map(|&metric| {
        let daily = spread_daily_actuals(metric.value(&so_far), elapsed_days, &mut rng);
        (metric, daily)
    })
    .collect();

    PartialPeriod {
        year: 2025,
        month: Month::Jun,
        elapsed_days,
        so_far,
        daily_actuals,
    }
}

/// The built-in demonstration dataset: 2024 in full, 2025 through June with
/// June in progress.
pub fn seed_dataset() -> Dataset {
    Dataset {
        metrics: vec![metric_set(2024, &METRICS_2024), metric_set(2025, &METRICS_2025)],
        advisors: advisor_records(),
        advisor_performance: advisor_performance(),
        complaints: complaints(),
        psf_complaints: psf_complaints(),
        kpis: vec![kpis_2024(), kpis_2025()],
        partial_period: Some(june_partial_period()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seed_is_deterministic() {
        assert_eq!(seed_dataset(), seed_dataset());
    }

    #[test]
    fn test_seed_shape() {
        let dataset = seed_dataset();
        assert_eq!(dataset.metric_years(), vec![2024, 2025]);
        assert_eq!(dataset.yearly_metrics(2024).months.len(), 12);
        assert_eq!(dataset.yearly_metrics(2025).months.len(), 6);
        assert_eq!(dataset.advisor_records(2025, Some(Month::Jun)).len(), 10);
        assert_eq!(dataset.complaints.len(), 10);
        assert_eq!(dataset.advisor_performance.len(), 8);
        assert_eq!(dataset.psf_complaints.len(), 12);

        let june = dataset.yearly_metrics(2025).lookup(Month::Jun).values();
        assert_eq!(MetricKey::Throughput.value(&june), 663.0);
    }

    #[test]
    fn test_june_advisor_figures_are_unscaled() {
        let dataset = seed_dataset();
        let june = dataset.advisor_records(2025, Some(Month::Jun));
        let ajay = june.iter().find(|r| r.advisor_name == "Ajay Kumar").unwrap();
        assert_eq!(ajay.throughput, 353);
        assert_eq!(ajay.item(RevenueItem::Battery), 539047.01);
        assert_eq!(ajay.revenue_items["Wheel Alignment (Nos)"], 7.0);
    }

    #[test]
    fn test_daily_spread_covers_total() {
        let mut rng = StdRng::seed_from_u64(7);
        let daily = spread_daily_actuals(320.0, 14, &mut rng);

        assert_eq!(daily.len(), 14);
        assert!(daily.iter().all(|v| *v >= 0.0));
        let sum: f64 = daily.iter().sum();
        assert!((sum - 320.0).abs() < 0.01 * 14.0);
        assert!(spread_daily_actuals(320.0, 0, &mut rng).is_empty());
        assert_eq!(spread_daily_actuals(320.0, 1, &mut rng), vec![320.0]);
    }

    #[test]
    fn test_partial_period_daily_actuals() {
        let period = june_partial_period();
        assert_eq!(period.elapsed_days, 14);
        for metric in [MetricKey::MechRo, MetricKey::BpRo, MetricKey::PartsRevenue, MetricKey::LabourRevenue] {
            let daily = period.daily(metric).unwrap();
            assert_eq!(daily.len(), 14);
            let sum: f64 = daily.iter().sum();
            let expected = metric.value(&period.so_far);
            assert!((sum - expected).abs() < 0.1, "{:?}: {} vs {}", metric, sum, expected);
        }
        assert!(period.daily(MetricKey::AccessoriesRevenue).is_none());
    }
}
