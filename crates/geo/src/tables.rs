//! Static reference tables for country coordinates.
//!
//! The fallback table carries approximate country centroids for every place
//! the backend is expected to report. Alias entries are pure name relations
//! (variant → canonical) and never own coordinate data themselves.

use std::collections::HashMap;
use std::sync::LazyLock;

use model::Coordinate;

pub(crate) static FALLBACK_COORDS: LazyLock<HashMap<&'static str, Coordinate>> =
    LazyLock::new(|| {
        HashMap::from([
            ("Afghanistan", Coordinate::new(33.9391, 67.7100)),
            ("Albania", Coordinate::new(41.1533, 20.1683)),
            ("Algeria", Coordinate::new(28.0339, 1.6596)),
            ("Andorra", Coordinate::new(42.5063, 1.5218)),
            ("Angola", Coordinate::new(-11.2027, 17.8739)),
            ("Argentina", Coordinate::new(-38.4161, -63.6167)),
            ("Armenia", Coordinate::new(40.0691, 45.0382)),
            ("Australia", Coordinate::new(-25.2744, 133.7751)),
            ("Austria", Coordinate::new(47.5162, 14.5501)),
            ("Azerbaijan", Coordinate::new(40.1431, 47.5769)),
            ("Bahamas", Coordinate::new(25.0343, -77.3963)),
            ("Bahrain", Coordinate::new(26.0667, 50.5577)),
            ("Bangladesh", Coordinate::new(23.6850, 90.3563)),
            ("Barbados", Coordinate::new(13.1939, -59.5432)),
            ("Belarus", Coordinate::new(53.7098, 27.9534)),
            ("Belgium", Coordinate::new(50.5039, 4.4699)),
            ("Belize", Coordinate::new(17.1899, -88.4976)),
            ("Benin", Coordinate::new(9.3077, 2.3158)),
            ("Bhutan", Coordinate::new(27.5142, 90.4336)),
            ("Bolivia", Coordinate::new(-16.2902, -63.5887)),
            ("Bosnia and Herzegovina", Coordinate::new(43.9159, 17.6791)),
            ("Botswana", Coordinate::new(-22.3285, 24.6849)),
            ("Brazil", Coordinate::new(-14.2350, -51.9253)),
            ("Brunei", Coordinate::new(4.5353, 114.7277)),
            ("Bulgaria", Coordinate::new(42.7339, 25.4858)),
            ("Burkina Faso", Coordinate::new(12.2383, -1.5616)),
            ("Burma", Coordinate::new(21.9162, 95.9560)),
            ("Burundi", Coordinate::new(-3.3731, 29.9189)),
            ("Cambodia", Coordinate::new(12.5657, 104.9910)),
            ("Cameroon", Coordinate::new(7.3697, 12.3547)),
            ("Canada", Coordinate::new(56.1304, -106.3468)),
            ("Chad", Coordinate::new(15.4542, 18.7322)),
            ("Chile", Coordinate::new(-35.6751, -71.5430)),
            ("China", Coordinate::new(35.8617, 104.1954)),
            ("Colombia", Coordinate::new(4.5709, -74.2973)),
            ("Costa Rica", Coordinate::new(9.7489, -83.7534)),
            ("Cote d'Ivoire", Coordinate::new(7.5400, -5.5471)),
            ("Croatia", Coordinate::new(45.1000, 15.2000)),
            ("Cuba", Coordinate::new(21.5218, -77.7812)),
            ("Cyprus", Coordinate::new(35.1264, 33.4299)),
            ("Czechia", Coordinate::new(49.8175, 15.4730)),
            ("Denmark", Coordinate::new(56.2639, 9.5018)),
            ("Dominican Republic", Coordinate::new(18.7357, -70.1627)),
            ("Ecuador", Coordinate::new(-1.8312, -78.1834)),
            ("Egypt", Coordinate::new(26.8206, 30.8025)),
            ("El Salvador", Coordinate::new(13.7942, -88.8965)),
            ("Estonia", Coordinate::new(58.5953, 25.0136)),
            ("Eswatini", Coordinate::new(-26.5225, 31.4659)),
            ("Ethiopia", Coordinate::new(9.1450, 40.4897)),
            ("Fiji", Coordinate::new(-17.7134, 178.0650)),
            ("Finland", Coordinate::new(61.9241, 25.7482)),
            ("France", Coordinate::new(46.2276, 2.2137)),
            ("Gabon", Coordinate::new(-0.8037, 11.6094)),
            ("Georgia", Coordinate::new(42.3154, 43.3569)),
            ("Germany", Coordinate::new(51.1657, 10.4515)),
            ("Ghana", Coordinate::new(7.9465, -1.0232)),
            ("Greece", Coordinate::new(39.0742, 21.8243)),
            ("Guatemala", Coordinate::new(15.7835, -90.2308)),
            ("Guinea", Coordinate::new(9.9456, -9.6966)),
            ("Haiti", Coordinate::new(18.9712, -72.2852)),
            ("Honduras", Coordinate::new(15.2000, -86.2419)),
            ("Hungary", Coordinate::new(47.1625, 19.5033)),
            ("Iceland", Coordinate::new(64.9631, -19.0208)),
            ("India", Coordinate::new(20.5937, 78.9629)),
            ("Indonesia", Coordinate::new(-0.7893, 113.9213)),
            ("Iran", Coordinate::new(32.4279, 53.6880)),
            ("Iraq", Coordinate::new(33.2232, 43.6793)),
            ("Ireland", Coordinate::new(53.4129, -8.2439)),
            ("Israel", Coordinate::new(31.0461, 34.8516)),
            ("Italy", Coordinate::new(41.8719, 12.5674)),
            ("Jamaica", Coordinate::new(18.1096, -77.2975)),
            ("Japan", Coordinate::new(36.2048, 138.2529)),
            ("Jordan", Coordinate::new(30.5852, 36.2384)),
            ("Kazakhstan", Coordinate::new(48.0196, 66.9237)),
            ("Kenya", Coordinate::new(-0.0236, 37.9062)),
            ("Korea, South", Coordinate::new(35.9078, 127.7669)),
            ("Kuwait", Coordinate::new(29.3117, 47.4818)),
            ("Kyrgyzstan", Coordinate::new(41.2044, 74.7661)),
            ("Laos", Coordinate::new(19.8563, 102.4955)),
            ("Latvia", Coordinate::new(56.8796, 24.6032)),
            ("Lebanon", Coordinate::new(33.8547, 35.8623)),
            ("Liberia", Coordinate::new(6.4281, -9.4295)),
            ("Libya", Coordinate::new(26.3351, 17.2283)),
            ("Lithuania", Coordinate::new(55.1694, 23.8813)),
            ("Luxembourg", Coordinate::new(49.8153, 6.1296)),
            ("Madagascar", Coordinate::new(-18.7669, 46.8691)),
            ("Malawi", Coordinate::new(-13.2543, 34.3015)),
            ("Malaysia", Coordinate::new(4.2105, 101.9758)),
            ("Maldives", Coordinate::new(3.2028, 73.2207)),
            ("Mali", Coordinate::new(17.5707, -3.9962)),
            ("Malta", Coordinate::new(35.9375, 14.3754)),
            ("Mauritania", Coordinate::new(21.0079, -10.9408)),
            ("Mauritius", Coordinate::new(-20.3484, 57.5522)),
            ("Mexico", Coordinate::new(23.6345, -102.5528)),
            ("Moldova", Coordinate::new(47.4116, 28.3699)),
            ("Monaco", Coordinate::new(43.7384, 7.4246)),
            ("Mongolia", Coordinate::new(46.8625, 103.8467)),
            ("Montenegro", Coordinate::new(42.7087, 19.3744)),
            ("Morocco", Coordinate::new(31.7917, -7.0926)),
            ("Mozambique", Coordinate::new(-18.6657, 35.5296)),
            ("Namibia", Coordinate::new(-22.9576, 18.4904)),
            ("Nepal", Coordinate::new(28.3949, 84.1240)),
            ("Netherlands", Coordinate::new(52.1326, 5.2913)),
            ("New Zealand", Coordinate::new(-40.9006, 174.8860)),
            ("Nicaragua", Coordinate::new(12.8654, -85.2072)),
            ("Niger", Coordinate::new(17.6078, 8.0817)),
            ("Nigeria", Coordinate::new(9.0820, 8.6753)),
            ("North Macedonia", Coordinate::new(41.6086, 21.7453)),
            ("Norway", Coordinate::new(60.4720, 8.4689)),
            ("Oman", Coordinate::new(21.4735, 55.9754)),
            ("Pakistan", Coordinate::new(30.3753, 69.3451)),
            ("Panama", Coordinate::new(8.5380, -80.7821)),
            ("Papua New Guinea", Coordinate::new(-6.3150, 143.9555)),
            ("Paraguay", Coordinate::new(-23.4425, -58.4438)),
            ("Peru", Coordinate::new(-9.1900, -75.0152)),
            ("Philippines", Coordinate::new(12.8797, 121.7740)),
            ("Poland", Coordinate::new(51.9194, 19.1451)),
            ("Portugal", Coordinate::new(39.3999, -8.2245)),
            ("Qatar", Coordinate::new(25.3548, 51.1839)),
            ("Romania", Coordinate::new(45.9432, 24.9668)),
            ("Russia", Coordinate::new(61.5240, 105.3188)),
            ("Rwanda", Coordinate::new(-1.9403, 29.8739)),
            ("Saudi Arabia", Coordinate::new(23.8859, 45.0792)),
            ("Senegal", Coordinate::new(14.4974, -14.4524)),
            ("Serbia", Coordinate::new(44.0165, 21.0059)),
            ("Singapore", Coordinate::new(1.3521, 103.8198)),
            ("Slovakia", Coordinate::new(48.6690, 19.6990)),
            ("Slovenia", Coordinate::new(46.1512, 14.9955)),
            ("Somalia", Coordinate::new(5.1521, 46.1996)),
            ("South Africa", Coordinate::new(-30.5595, 22.9375)),
            ("South Sudan", Coordinate::new(6.8770, 31.3070)),
            ("Spain", Coordinate::new(40.4637, -3.7492)),
            ("Sri Lanka", Coordinate::new(7.8731, 80.7718)),
            ("Sudan", Coordinate::new(12.8628, 30.2176)),
            ("Sweden", Coordinate::new(60.1282, 18.6435)),
            ("Switzerland", Coordinate::new(46.8182, 8.2275)),
            ("Syria", Coordinate::new(34.8021, 38.9968)),
            ("Taiwan", Coordinate::new(23.6978, 120.9605)),
            ("Tajikistan", Coordinate::new(38.8610, 71.2761)),
            ("Tanzania", Coordinate::new(-6.3690, 34.8888)),
            ("Thailand", Coordinate::new(15.8700, 100.9925)),
            ("Tunisia", Coordinate::new(33.8869, 9.5375)),
            ("Turkey", Coordinate::new(38.9637, 35.2433)),
            ("Uganda", Coordinate::new(1.3733, 32.2903)),
            ("Ukraine", Coordinate::new(48.3794, 31.1656)),
            ("United Arab Emirates", Coordinate::new(23.4241, 53.8478)),
            ("United Kingdom", Coordinate::new(55.3781, -3.4360)),
            ("Uruguay", Coordinate::new(-32.5228, -55.7658)),
            ("US", Coordinate::new(37.0902, -95.7129)),
            ("Uzbekistan", Coordinate::new(41.3775, 64.5853)),
            ("Venezuela", Coordinate::new(6.4238, -66.5897)),
            ("Vietnam", Coordinate::new(14.0583, 108.2772)),
            ("Yemen", Coordinate::new(15.5527, 48.5164)),
            ("Zambia", Coordinate::new(-13.1339, 27.8493)),
            ("Zimbabwe", Coordinate::new(-19.0154, 29.1549)),
        ])
    });

/// Variant spelling → canonical key in the coordinate tables.
pub(crate) static ALIASES: LazyLock<HashMap<&'static str, &'static str>> = LazyLock::new(|| {
    HashMap::from([
        ("United States", "USA"),
        ("United States of America", "USA"),
        ("USA", "US"),
        ("UK", "United Kingdom"),
        ("Great Britain", "United Kingdom"),
        ("South Korea", "Korea, South"),
        ("Republic of Korea", "Korea, South"),
        ("Czech Republic", "Czechia"),
        ("Myanmar", "Burma"),
        ("Taiwan*", "Taiwan"),
        ("Russian Federation", "Russia"),
        ("Viet Nam", "Vietnam"),
        ("UAE", "United Arab Emirates"),
        ("Swaziland", "Eswatini"),
        ("Macedonia", "North Macedonia"),
        ("Ivory Coast", "Cote d'Ivoire"),
    ])
});
